use std::cmp::Ordering;
use std::collections::BTreeSet;

use utils_common::models::Record;

use crate::models::{Criteria, FilterIndex, FilterResult};

/// 按条件筛选记录，保持输入顺序
///
/// 类别、查询词、分面三个条件同时满足才保留。没有匹配时返回空列表。
pub fn apply<'a>(records: &'a [Record], criteria: &Criteria) -> Vec<&'a Record> {
    let query = criteria.query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            matches_category(record, criteria)
                && matches_query(record, &query)
                && matches_facet(record, criteria)
        })
        .collect()
}

fn matches_category(record: &Record, criteria: &Criteria) -> bool {
    criteria
        .category
        .as_only()
        .map_or(true, |category| record.category == *category)
}

// query 已转为小写
fn matches_query(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    record.title.to_lowercase().contains(query)
        || record.description.to_lowercase().contains(query)
        || record.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

// 子串匹配日期原文，"2023" 可以匹配 "March 2023"
fn matches_facet(record: &Record, criteria: &Criteria) -> bool {
    criteria
        .facet
        .as_only()
        .map_or(true, |facet| record.date.contains(facet.as_str()))
}

/// 枚举所有不同的分面值
///
/// 数字年份按数值降序排在前面，其余按字典序排在后面。
pub fn facets(records: &[Record]) -> Vec<String> {
    let unique: BTreeSet<&str> = records.iter().map(Record::facet).collect();
    let mut facets: Vec<String> = unique.into_iter().map(str::to_string).collect();
    facets.sort_by(|a, b| compare_facets(a, b));
    facets
}

fn compare_facets(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// 记录过滤器 - 持有构造时给定的不可变记录集合
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    records: Vec<Record>,
}

impl RecordFilter {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn apply(&self, criteria: &Criteria) -> Vec<&Record> {
        apply(&self.records, criteria)
    }

    /// 筛选并生成可序列化的结果
    pub fn filter(&self, criteria: &Criteria) -> FilterResult {
        FilterResult::from_matches(self.apply(criteria))
    }

    pub fn facets(&self) -> Vec<String> {
        facets(&self.records)
    }
}

impl From<FilterIndex> for RecordFilter {
    fn from(index: FilterIndex) -> Self {
        Self::new(index.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils_common::models::Category;

    fn record(id: &str, category: Category, date: &str, title: &str, tags: &[&str]) -> Record {
        Record {
            id: id.to_string(),
            title: title.to_string(),
            journal: String::new(),
            date: date.to_string(),
            category,
            description: format!("Notes on {}", title.to_lowercase()),
            link: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn cybersecurity() -> Record {
        Record {
            id: "1".to_string(),
            title: "Legal Aspects of Cybersecurity Incidents Prevention and Response".to_string(),
            journal: "International Journal of Novel and Development".to_string(),
            date: "2023".to_string(),
            category: Category::Article,
            description: "An analysis of legal frameworks and best practices for preventing and responding to cybersecurity incidents, with a focus on regulatory compliance and liability issues.".to_string(),
            link: Some("#".to_string()),
            tags: vec![
                "Cybersecurity".to_string(),
                "Legal Compliance".to_string(),
                "Incident Response".to_string(),
                "Digital Law".to_string(),
            ],
        }
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn cybersecurity_scenario() {
        let records = vec![cybersecurity()];

        assert_eq!(ids(&apply(&records, &Criteria::all().with_query("cyber"))), vec!["1"]);
        assert!(apply(&records, &Criteria::all().with_category(Category::Journal)).is_empty());
        assert!(apply(&records, &Criteria::all().with_facet("2022")).is_empty());
        assert_eq!(ids(&apply(&records, &Criteria::all().with_facet("2023"))), vec!["1"]);
    }

    #[test]
    fn query_searches_description_and_tags() {
        let records = vec![cybersecurity()];
        assert_eq!(apply(&records, &Criteria::all().with_query("REGULATORY")).len(), 1);
        assert_eq!(apply(&records, &Criteria::all().with_query("digital law")).len(), 1);
        assert!(apply(&records, &Criteria::all().with_query("maritime")).is_empty());
    }

    #[test]
    fn query_is_not_trimmed() {
        let records = vec![record("a", Category::Book, "2020", "Contracts", &[])];
        assert!(apply(&records, &Criteria::all().with_query(" contracts ")).is_empty());
    }

    #[test]
    fn facet_matches_inside_composite_dates() {
        let records = vec![
            record("a", Category::Journal, "March 2021", "Torts", &[]),
            record("b", Category::Journal, "2022", "Equity", &[]),
        ];
        assert_eq!(ids(&apply(&records, &Criteria::all().with_facet("2021"))), vec!["a"]);
        assert_eq!(ids(&apply(&records, &Criteria::all().with_facet("March"))), vec!["a"]);
        assert_eq!(ids(&apply(&records, &Criteria::all().with_facet("202"))), vec!["a", "b"]);
    }

    #[test]
    fn all_criteria_are_conjunctive() {
        let records = vec![
            record("a", Category::Article, "2023", "Privacy Law", &["GDPR"]),
            record("b", Category::Research, "2023", "Privacy Research", &[]),
            record("c", Category::Article, "2021", "Privacy Torts", &[]),
        ];
        let criteria = Criteria::all()
            .with_category(Category::Article)
            .with_query("privacy")
            .with_facet("2023");
        assert_eq!(ids(&apply(&records, &criteria)), vec!["a"]);
    }

    #[test]
    fn facets_sort_years_descending() {
        let records = vec![
            record("a", Category::Article, "2021", "A", &[]),
            record("b", Category::Article, "June 2023", "B", &[]),
            record("c", Category::Article, "2023", "C", &[]),
            record("d", Category::Article, "2019", "D", &[]),
        ];
        assert_eq!(facets(&records), vec!["2023", "2021", "2019"]);
    }

    #[test]
    fn non_numeric_facets_follow_years() {
        let records = vec![
            record("a", Category::Article, "Forthcoming", "A", &[]),
            record("b", Category::Article, "2020", "B", &[]),
            record("c", Category::Article, "Accepted", "C", &[]),
        ];
        assert_eq!(facets(&records), vec!["2020", "Accepted", "Forthcoming"]);
    }

    #[test]
    fn facets_of_empty_collection() {
        assert!(facets(&[]).is_empty());
    }

    #[test]
    fn filter_result_clones_matches() {
        let filter = RecordFilter::new(vec![cybersecurity()]);
        let result = filter.filter(&Criteria::all().with_query("nothing like this"));
        assert!(result.is_empty);
        assert_eq!(filter.len(), 1);

        let result = filter.filter(&Criteria::all());
        assert_eq!(result.total, 1);
        assert_eq!(result.records[0], cybersecurity());
    }
}
