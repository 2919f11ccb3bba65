use serde::{Deserialize, Serialize};
use utils_common::compression::{from_compressed_with_max_version, to_compressed};
use utils_common::models::{Category, IndexMetadata, Record, SectionInfo};

/// 表示“不限制”的哨兵值
pub const ALL_SENTINEL: &str = "all";

/// 索引文件格式版本
pub const INDEX_VERSION: [u8; 2] = [1, 0];

/// 单个筛选维度 - 不限制或限定为某个值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selector::All => None,
            Selector::Only(value) => Some(value),
        }
    }
}

/// 筛选条件 - 类别、查询词和分面三者同时生效
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub category: Selector<Category>,
    pub query: String,
    pub facet: Selector<String>,
}

impl Criteria {
    /// 不做任何限制的条件
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Selector::Only(category);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_facet(mut self, facet: impl Into<String>) -> Self {
        self.facet = Selector::Only(facet.into());
        self
    }
}

/// 筛选参数 - 客户端传递的筛选条件
#[derive(Deserialize, Debug, Default)]
pub struct FilterParams {
    /// 类别: "all" 或 article/journal/research/book (可选)
    pub category: Option<String>,
    /// 查询词 (可选, 默认为空)
    pub query: Option<String>,
    /// 分面（年份）: "all" 或具体值 (可选)
    #[serde(alias = "year")]
    pub facet: Option<String>,
}

impl FilterParams {
    /// 转换为类型化的筛选条件
    ///
    /// 缺省、null 和 "all" 都视为不限制；未知类别返回错误。
    pub fn to_criteria(&self) -> Result<Criteria, String> {
        let category = match selected(self.category.as_deref()) {
            Some(name) => Selector::Only(name.parse::<Category>()?),
            None => Selector::All,
        };
        let facet = match selected(self.facet.as_deref()) {
            Some(value) => Selector::Only(value.to_string()),
            None => Selector::All,
        };

        Ok(Criteria {
            category,
            query: self.query.clone().unwrap_or_default(),
            facet,
        })
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != ALL_SENTINEL)
}

/// 筛选结果 - 返回给客户端
#[derive(Serialize, Debug)]
pub struct FilterResult {
    /// 筛选后的记录，保持原始顺序
    pub records: Vec<Record>,
    /// 结果总数
    pub total: usize,
    /// 是否为空，客户端据此显示“未找到”提示
    pub is_empty: bool,
}

impl FilterResult {
    pub fn from_matches(matches: Vec<&Record>) -> Self {
        let records: Vec<Record> = matches.into_iter().cloned().collect();
        let total = records.len();
        Self {
            records,
            total,
            is_empty: total == 0,
        }
    }
}

/// 筛选索引 - 持久化的记录集合
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FilterIndex {
    pub metadata: IndexMetadata,
    pub section: SectionInfo,
    /// 所有记录，保持输入顺序
    pub records: Vec<Record>,
    /// 预先枚举的分面值
    pub facets: Vec<String>,
}

impl FilterIndex {
    /// 从压缩的二进制数据恢复索引
    pub fn from_compressed(data: &[u8]) -> Result<Self, String> {
        from_compressed_with_max_version(data, INDEX_VERSION[0])
            .map_err(|e| format!("解析索引失败: {}", e))
    }

    /// 序列化为压缩的二进制数据
    pub fn to_compressed(&self) -> Result<Vec<u8>, String> {
        to_compressed(self, INDEX_VERSION).map_err(|e| format!("压缩筛选索引失败: {}", e))
    }
}

/// 外部提供的简历数据
#[derive(Deserialize, Debug, Default)]
pub struct Payload {
    #[serde(default)]
    pub section: Option<SectionInfo>,
    #[serde(default, alias = "records")]
    pub publications: Vec<Record>,
}
