use super::groups::Groups;
use super::pairs::SeparatedPairs;
use std::collections::BTreeMap;

const INDENT: &str = "    ";

/// One side of a written `pos` rule: a glyph or class name, or an inline
/// glyph list.
pub(crate) trait RuleSide {
    fn is_inline(&self) -> bool;
    fn is_empty(&self) -> bool;
    fn to_fea(&self) -> String;
}

impl RuleSide for String {
    fn is_inline(&self) -> bool {
        false
    }
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
    fn to_fea(&self) -> String {
        self.clone()
    }
}

impl RuleSide for Vec<String> {
    fn is_inline(&self) -> bool {
        true
    }
    fn is_empty(&self) -> bool {
        <[String]>::is_empty(self)
    }
    fn to_fea(&self) -> String {
        let mut members: Vec<&str> = self.iter().map(|s| s.as_str()).collect();
        members.sort();
        format!("[{}]", members.join(" "))
    }
}

/// `@name = [members];` for every class, sorted by class name.
pub(crate) fn class_definitions(side1: &Groups, side2: &Groups) -> Vec<String> {
    let mut all: BTreeMap<&String, &Vec<String>> = side1.iter().collect();
    all.extend(side2.iter());
    all.into_iter()
        .map(|(name, members)| {
            let mut members: Vec<&str> = members.iter().map(|s| s.as_str()).collect();
            members.sort();
            format!("{name} = [{}];", members.join(" "))
        })
        .collect()
}

pub(crate) fn feature_rules<A: RuleSide, B: RuleSide>(pairs: &BTreeMap<(A, B), i32>) -> Vec<String> {
    pairs
        .iter()
        .filter(|((first, second), _)| !first.is_empty() && !second.is_empty())
        .map(|((first, second), value)| {
            let keyword = if first.is_inline() || second.is_inline() {
                "enum pos"
            } else {
                "pos"
            };
            format!("{keyword} {} {} {value};", first.to_fea(), second.to_fea())
        })
        .collect()
}

/// All rule sections in writing order, each introduced by a blank line and
/// a label comment. Empty sections are left out.
pub(crate) fn rule_sections(pairs: &SeparatedPairs) -> Vec<String> {
    let sections = [
        ("# glyph, glyph", feature_rules(&pairs.glyph_glyph)),
        (
            "# glyph, group exceptions",
            feature_rules(&pairs.glyph_group_decomposed),
        ),
        (
            "# group exceptions, glyph",
            feature_rules(&pairs.group_glyph_decomposed),
        ),
        ("# glyph, group", feature_rules(&pairs.glyph_group)),
        ("# group, glyph", feature_rules(&pairs.group_glyph)),
        ("# group, group", feature_rules(&pairs.group_group)),
    ];
    let mut lines = vec![];
    for (label, rules) in sections {
        if rules.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(label.to_string());
        lines.extend(rules);
    }
    lines
}

/// Wraps `body` in a kern feature block. Header lines become comments.
pub(crate) fn kern_feature_block(header: Option<&str>, body: &[String]) -> String {
    let mut feature = vec!["feature kern {".to_string()];
    if let Some(header) = header {
        for line in header.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                feature.push(format!("{INDENT}{line}"));
            } else {
                feature.push(format!("{INDENT}# {line}"));
            }
        }
    }
    for line in body {
        if line.is_empty() {
            feature.push(String::new());
        } else {
            feature.push(format!("{INDENT}{line}"));
        }
    }
    feature.push("} kern;".to_string());
    feature.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_definitions_are_sorted() {
        let side1: Groups = [("@kern1.B".to_string(), vec!["eight".into(), "B".into()])].into();
        let side2: Groups = [("@kern2.A".to_string(), vec!["Agrave".into(), "A".into()])].into();
        assert_eq!(
            class_definitions(&side1, &side2),
            vec!["@kern1.B = [B eight];", "@kern2.A = [A Agrave];"]
        );
    }

    #[test]
    fn test_rule_formats() {
        let plain: BTreeMap<(String, String), i32> =
            [(("@kern1.D".into(), "X".into()), -25)].into();
        assert_eq!(feature_rules(&plain), vec!["pos @kern1.D X -25;"]);

        let inline: BTreeMap<(Vec<String>, String), i32> =
            [((vec!["Aacute".into(), "A".into()], "Agrave".into()), -75)].into();
        assert_eq!(feature_rules(&inline), vec!["enum pos [A Aacute] Agrave -75;"]);

        let empty: BTreeMap<(String, Vec<String>), i32> = [(("x".into(), vec![]), 10)].into();
        assert!(feature_rules(&empty).is_empty());
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut pairs = SeparatedPairs::default();
        pairs
            .group_group
            .insert(("@kern1.A".into(), "@kern2.A".into()), -25);
        assert_eq!(
            rule_sections(&pairs),
            vec!["", "# group, group", "pos @kern1.A @kern2.A -25;"]
        );
    }

    #[test]
    fn test_header_becomes_comments() {
        let block = kern_feature_block(
            Some("Generated kerning\n  # already a comment\n"),
            &["@kern1.A = [A];".to_string(), String::new(), "pos A A 1;".to_string()],
        );
        assert_eq!(
            block,
            "feature kern {\n    # Generated kerning\n    # already a comment\n    @kern1.A = [A];\n\n    pos A A 1;\n} kern;"
        );
    }
}
