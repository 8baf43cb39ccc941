use crate::models::Mueble;

/// One past the highest code in use, or 1 when the catalog is empty.
///
/// The caller reads the whole collection first, so two concurrent creates can
/// race to the same value. The unique index on `codigo` rejects the loser.
pub fn next_code<'a>(muebles: impl IntoIterator<Item = &'a Mueble>) -> i64 {
    muebles
        .into_iter()
        .map(|m| m.code)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_code(code: i64) -> Mueble {
        Mueble {
            id: None,
            code,
            name: format!("mueble {code}"),
            price: 1.0,
            category: "x".into(),
        }
    }

    #[test]
    fn test_empty_catalog_starts_at_one() {
        assert_eq!(next_code(&Vec::<Mueble>::new()), 1);
    }

    #[test]
    fn test_uses_highest_code_not_count() {
        let muebles = vec![with_code(3), with_code(7), with_code(5)];
        assert_eq!(next_code(&muebles), 8);
    }
}
