use unicode_normalization::UnicodeNormalization;

/// Normaliza texto libre antes de enviarlo al modelo: descompone (NFKD),
/// elimina marcas diacríticas y todo carácter no ASCII, y colapsa los
/// espacios en blanco.
pub fn sanitize_text(text: &str) -> String {
    let ascii: String = text.nfkd()
                            .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
                            .filter(char::is_ascii)
                            .collect();
    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}
