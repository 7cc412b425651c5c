use phf::phf_map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 题型枚举
///
/// 每个评分部分（section）都显式携带题型，不再依赖文件名前缀推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// 单项选择
    Mcq,
    /// 判断题
    TrueFalse,
    /// 填空题
    FillIn,
    /// 连线 / 匹配题
    Matching,
    /// 词汇题
    Vocabulary,
    /// 听力题
    Listening,
    /// 写作 / 作文
    Writing,
}

/// `type` 字段的别名表（小写）
static KIND_ALIASES: phf::Map<&'static str, SectionKind> = phf_map! {
    "mcq" => SectionKind::Mcq,
    "multiple_choice" => SectionKind::Mcq,
    "tf" => SectionKind::TrueFalse,
    "true_false" => SectionKind::TrueFalse,
    "truefalse" => SectionKind::TrueFalse,
    "fill" => SectionKind::FillIn,
    "fill_in" => SectionKind::FillIn,
    "fillin" => SectionKind::FillIn,
    "match" => SectionKind::Matching,
    "matching" => SectionKind::Matching,
    "vocab" => SectionKind::Vocabulary,
    "vocabulary" => SectionKind::Vocabulary,
    "listening" => SectionKind::Listening,
    "writing" => SectionKind::Writing,
    "essay" => SectionKind::Writing,
};

impl SectionKind {
    /// 获取标准名称（序列化时使用）
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Mcq => "mcq",
            SectionKind::TrueFalse => "true_false",
            SectionKind::FillIn => "fill_in",
            SectionKind::Matching => "matching",
            SectionKind::Vocabulary => "vocabulary",
            SectionKind::Listening => "listening",
            SectionKind::Writing => "writing",
        }
    }

    /// 从 `type` 字段解析题型（忽略大小写和首尾空白，`-` `/` 和空格视为 `_`）
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");
        KIND_ALIASES.get(normalized.as_str()).copied()
    }

    /// 是否使用精确匹配评分（选择 / 判断 / 匹配）
    pub fn is_exact(self) -> bool {
        matches!(
            self,
            SectionKind::Mcq | SectionKind::TrueFalse | SectionKind::Matching
        )
    }

    /// 是否使用近似文本评分（填空 / 词汇 / 听力）
    pub fn is_approximate(self) -> bool {
        matches!(
            self,
            SectionKind::FillIn | SectionKind::Vocabulary | SectionKind::Listening
        )
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for SectionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SectionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SectionKind::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("未知题型: {}", raw)))
    }
}
