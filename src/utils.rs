/// Title-cases `text` the way the boundary files spell location names.
///
/// Every letter that follows a non-letter is uppercased, every other letter
/// is lowercased. Digits and punctuation start a new word, so `"o'neil"`
/// becomes `"O'Neil"` and `"24 parganas"` becomes `"24 Parganas"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
