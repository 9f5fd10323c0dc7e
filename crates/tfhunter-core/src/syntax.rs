//! 词法常量与预编译正则（注释标记、配置关键字）
//!
//! 关键字与注释标记均为编译期常量，运行时不可配置。
//! 所有正则在首次使用时编译一次，之后在各线程间只读共享。
use once_cell::sync::Lazy;
use regex::Regex;

/// 顶层配置块关键字（封闭集合）
pub const CONFIG_KEYWORDS: [&str; 8] = [
    "resource", "variable", "output", "module", "provider", "data", "locals", "terraform",
];

/// 单行注释标记
pub const LINE_MARKERS: [&str; 2] = ["#", "//"];

/// 块注释起止符
pub const BLOCK_COMMENT_OPEN: &str = "/*";
pub const BLOCK_COMMENT_CLOSE: &str = "*/";

/// 单行内即开即关的块注释最小长度（仅含 `/*` 与 `*/` 的行不算闭合）
pub(crate) const MIN_INLINE_BLOCK_COMMENT_LEN: usize = 4;

fn keyword_alternation() -> String {
    CONFIG_KEYWORDS.join("|")
}

/// `(?:#|//)`
fn marker() -> String {
    let alts: Vec<String> = LINE_MARKERS.iter().map(|m| regex::escape(m)).collect();
    format!("(?:{})", alts.join("|"))
}

fn compile(pattern: &str) -> Regex {
    // 模式均为内置常量，编译失败属于编码错误
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// 注释标记后任意位置出现完整关键字
pub(crate) static COMMENTED_KEYWORD: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}.*\b(?:{})\b", marker(), keyword_alternation())));

/// 注释掉的属性赋值：`# name = value`
pub(crate) static COMMENTED_PROPERTY: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}.*\b\w+\s*=\s*.+", marker())));

/// 注释标记后出现 `{` 或 `}`
pub(crate) static COMMENTED_BRACE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}.*[{{}}]", marker())));

/// 多行块起始：`# resource "x" "y" {`
pub(crate) static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}\s*(?:{})\b.*\{{\s*$", marker(), keyword_alternation())));

/// 多行块结束：`# }`
pub(crate) static BLOCK_CLOSE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}\s*\}}\s*$", marker())));

/// 单行块的关键字外形：关键字之后先出现 `{`，之后还有 `}`
pub(crate) static SINGLE_LINE_BLOCK: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{}\s*(?:{})\b[^{{]*\{{.*\}}", marker(), keyword_alternation())));

/// 不要求注释标记的完整关键字搜索（块注释内部使用）
pub(crate) static BARE_KEYWORD: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\b(?:{})\b", keyword_alternation())));

/// 从第一个 `{` 起，括号深度不为负且最终归零
pub(crate) fn has_balanced_braces(line: &str) -> bool {
    let Some(first) = line.find('{') else { return false };
    let mut depth: usize = 0;
    for ch in line[first..].chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        for re in [
            &*COMMENTED_KEYWORD,
            &*COMMENTED_PROPERTY,
            &*COMMENTED_BRACE,
            &*BLOCK_OPEN,
            &*BLOCK_CLOSE,
            &*SINGLE_LINE_BLOCK,
            &*BARE_KEYWORD,
        ] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[test]
    fn keyword_match_is_whole_word() {
        assert!(BARE_KEYWORD.is_match(r#"data "aws_ami" "x" {"#));
        assert!(!BARE_KEYWORD.is_match("metadata = {}"));
        assert!(!BARE_KEYWORD.is_match("resources_total = 3"));
        assert!(!BARE_KEYWORD.is_match("data_source = 1"));
    }

    #[test]
    fn block_open_requires_trailing_brace() {
        assert!(BLOCK_OPEN.is_match(r#"# resource "x" "y" {"#));
        assert!(BLOCK_OPEN.is_match(r#"  //module "vpc" {   "#));
        assert!(!BLOCK_OPEN.is_match(r#"# resource "x" "y""#));
        assert!(!BLOCK_OPEN.is_match(r#"resource "x" "y" {"#));
    }

    #[test]
    fn block_close_is_lone_brace() {
        assert!(BLOCK_CLOSE.is_match("# }"));
        assert!(BLOCK_CLOSE.is_match("  //}  "));
        assert!(!BLOCK_CLOSE.is_match("}"));
        assert!(!BLOCK_CLOSE.is_match("# } # end"));
    }

    #[test]
    fn balanced_braces() {
        assert!(has_balanced_braces(r#"# locals { a = { b = 1 } }"#));
        assert!(!has_balanced_braces(r#"# locals { a = 1"#));
        assert!(!has_balanced_braces(r#"# locals { } {"#));
        assert!(!has_balanced_braces("# locals"));
    }
}
