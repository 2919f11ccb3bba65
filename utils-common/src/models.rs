use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 记录类别 - 固定的封闭集合
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Article,
    Journal,
    Research,
    Book,
}

impl Category {
    /// 所有类别，按标签页顺序排列
    pub const ALL: [Category; 4] = [
        Category::Article,
        Category::Journal,
        Category::Research,
        Category::Book,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Article => "article",
            Category::Journal => "journal",
            Category::Research => "research",
            Category::Book => "book",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("未知类别: {}", s))
    }
}

/// 可筛选记录 - 一篇出版物
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Record {
    /// 记录唯一标识符
    pub id: String,
    /// 标题
    pub title: String,
    /// 发表期刊或出处，仅用于展示
    #[serde(default)]
    pub journal: String,
    /// 自由格式的日期，例如 "2023" 或 "March 2023"
    pub date: String,
    /// 类别，原始数据中的键名为 type
    #[serde(alias = "type")]
    pub category: Category,
    /// 描述
    pub description: String,
    /// 外部链接
    #[serde(default)]
    pub link: Option<String>,
    /// 标签列表
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record {
    /// 从日期派生的分面标签（年份）
    pub fn facet(&self) -> &str {
        year_facet(&self.date)
    }
}

/// 从日期字符串提取年份标签
///
/// 多个空白分隔的词时取最后一个，否则返回整个字符串。
pub fn year_facet(date: &str) -> &str {
    let mut tokens = date.split_whitespace();
    match (tokens.next(), tokens.next_back()) {
        (Some(_), Some(last)) => last,
        _ => date,
    }
}

/// 栏目信息 - 列表上方展示的标题和说明
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SectionInfo {
    pub title: String,
    pub description: String,
}

impl Default for SectionInfo {
    fn default() -> Self {
        Self {
            title: "Publications".to_string(),
            description: "A collection of my published legal works, research papers, and articles in prestigious law journals.".to_string(),
        }
    }
}

/// 索引元数据 - 存储索引的基本信息
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IndexMetadata {
    /// 索引包含的记录数量
    pub record_count: usize,
    /// 不同分面值的数量
    pub facet_count: usize,
    /// 索引创建时间
    pub created_at: DateTime<Utc>,
    /// 索引版本
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_facet_takes_last_token() {
        assert_eq!(year_facet("2023"), "2023");
        assert_eq!(year_facet("March 2023"), "2023");
        assert_eq!(year_facet("12 March 2023"), "2023");
        assert_eq!(year_facet("March  2021"), "2021");
    }

    #[test]
    fn year_facet_keeps_whole_string_for_single_token() {
        assert_eq!(year_facet(""), "");
        assert_eq!(year_facet("   "), "   ");
        assert_eq!(year_facet(" 2020 "), " 2020 ");
        assert_eq!(year_facet("Forthcoming"), "Forthcoming");
    }

    #[test]
    fn category_parses_lowercase_names_only() {
        assert_eq!("journal".parse::<Category>(), Ok(Category::Journal));
        assert_eq!("book".parse::<Category>(), Ok(Category::Book));
        assert!("all".parse::<Category>().is_err());
        assert!("Article".parse::<Category>().is_err());
    }

    #[test]
    fn record_accepts_type_key() {
        let json = r##"{
            "id": "1",
            "title": "Legal Aspects of Cybersecurity Incidents Prevention and Response",
            "journal": "International Journal of Novel and Development",
            "date": "2023",
            "type": "article",
            "description": "An analysis of legal frameworks.",
            "link": "#",
            "tags": ["Cybersecurity", "Legal Compliance"]
        }"##;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, Category::Article);
        assert_eq!(record.link.as_deref(), Some("#"));
        assert_eq!(record.facet(), "2023");
    }

    #[test]
    fn record_optional_fields_default() {
        let json = r#"{"id":"2","title":"T","date":"May 2022","category":"book","description":"D"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert!(record.link.is_none());
        assert!(record.journal.is_empty());
        assert_eq!(record.facet(), "2022");
    }
}
