/// Strip `#` line comments and all whitespace from RBF source text.
///
/// The result keeps the remaining characters in order; it is not checked for
/// valid opcodes, which is left to [`crate::program::Program`] parsing.
pub fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace())
        .collect()
}
