/// 规范化 OCR 文本行：去除首尾空白，丢弃空行
pub fn normalize_lines<I, S>(fragments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
