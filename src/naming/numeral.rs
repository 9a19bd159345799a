use crate::OrganicError;

/// Greek multiplying stems for a single digit: "hen", "do", "tri", ...
fn greek(digit: usize) -> &'static str {
    match digit {
        1 => "hen",
        2 => "do",
        3 => "tri",
        4 => "tetra",
        5 => "pent",
        6 => "hex",
        7 => "hept",
        8 => "oct",
        9 => "non",
        _ => "",
    }
}

fn hundreds(digit: usize) -> String {
    match digit {
        1 => "hect".to_string(),
        2 => "dict".to_string(),
        3 => "trict".to_string(),
        4 => "tetract".to_string(),
        _ => format!("{}act", greek(digit)),
    }
}

fn ends_with_consonant(text: &str) -> bool {
    text.chars()
        .last()
        .map_or(false, |c| !"aeiou".contains(c))
}

/// The stem that names a chain of `n` carbons: "met", "et", "prop", "but",
/// "pent", ... "undec", "icos", "hentriacont", ... "nonanonacontanonact".
pub fn root(n: usize) -> Result<String, OrganicError> {
    let (tens, units) = (n / 10, n % 10);

    let root = match n {
        1 => "met".to_string(),
        2 => "et".to_string(),
        3 => "prop".to_string(),
        4 => "but".to_string(),
        5..=9 => greek(n).to_string(),
        10 => "dec".to_string(),
        11 => "undec".to_string(),
        12..=14 => format!("{}dec", greek(units)),
        15..=19 => format!("{}adec", greek(units)),
        20 => "icos".to_string(),
        21 => "heneicos".to_string(),
        22..=24 => format!("{}cos", greek(units)),
        25..=29 => format!("{}acos", greek(units)),
        30..=99 => {
            let elision = if units > 4 { "a" } else { "" };
            let ending = if tens == 4 { "cont" } else { "acont" };
            format!("{}{elision}{}{ending}", greek(units), greek(tens))
        }
        100 => "hect".to_string(),
        101..=999 => {
            let rest = match n % 100 {
                0 => String::new(),
                small @ 1..=4 => greek(small).to_string(),
                other => root(other)?,
            };
            let elision = if ends_with_consonant(&rest) && rest != "hen" {
                "a"
            } else {
                ""
            };
            format!("{rest}{elision}{}", hundreds(n / 100))
        }
        _ => return Err(OrganicError::UnnameableLength(n)),
    };

    Ok(root)
}

/// The multiplier for `n` occurrences of the same thing: "", "di", "tri",
/// "tetra", then the chain stem plus "a".
pub fn quantifier(n: usize) -> Result<String, OrganicError> {
    Ok(match n {
        1 => String::new(),
        2 => "di".to_string(),
        3 => "tri".to_string(),
        4 => "tetra".to_string(),
        _ => root(n)? + "a",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roots() {
        let expected = vec![
            (1, "met"),
            (2, "et"),
            (3, "prop"),
            (4, "but"),
            (5, "pent"),
            (9, "non"),
            (10, "dec"),
            (11, "undec"),
            (12, "dodec"),
            (14, "tetradec"),
            (15, "pentadec"),
            (20, "icos"),
            (21, "heneicos"),
            (22, "docos"),
            (25, "pentacos"),
            (30, "triacont"),
            (31, "hentriacont"),
            (40, "tetracont"),
            (42, "dotetracont"),
            (57, "heptapentacont"),
            (100, "hect"),
            (101, "henhect"),
            (102, "dohect"),
            (105, "pentahect"),
            (110, "decahect"),
            (132, "dotriacontahect"),
            (200, "dict"),
            (300, "trict"),
            (400, "tetract"),
            (500, "pentact"),
            (999, "nonanonacontanonact"),
        ];

        for (n, root_word) in expected {
            assert_eq!(root(n).unwrap(), root_word, "for {n}");
        }
    }

    #[test]
    fn test_unnameable() {
        assert_eq!(root(0), Err(OrganicError::UnnameableLength(0)));
        assert_eq!(root(1000), Err(OrganicError::UnnameableLength(1000)));
        assert!(quantifier(0).is_err());
    }

    #[test]
    fn test_quantifiers() {
        let expected = vec![
            (1, ""),
            (2, "di"),
            (3, "tri"),
            (4, "tetra"),
            (5, "penta"),
            (10, "deca"),
            (11, "undeca"),
            (20, "icosa"),
        ];

        for (n, word) in expected {
            assert_eq!(quantifier(n).unwrap(), word, "for {n}");
        }
    }
}
