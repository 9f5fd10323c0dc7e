//! 单行分类器：判断一行本身是否是被注释掉的配置语句
use crate::syntax::{COMMENTED_BRACE, COMMENTED_KEYWORD, COMMENTED_PROPERTY};

/// 纯函数，规则取并集：
/// - 注释标记之后任意位置出现完整关键字；
/// - 注释掉的属性赋值（`# name = value`），或注释标记之后出现 `{` / `}`。
///
/// 没有注释标记的行（正常代码）永远返回 false。
pub fn classify_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    COMMENTED_KEYWORD.is_match(line) || COMMENTED_PROPERTY.is_match(line) || COMMENTED_BRACE.is_match(line)
}
