use utils_common::models::{IndexMetadata, Record, SectionInfo};
use crate::filter::facets;
use crate::logging;
use crate::models::{FilterIndex, Payload};
use chrono::Utc;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;

/// 筛选索引构建器
#[derive(Default)]
pub struct FilterBuilder {
    records: Vec<Record>,
    section: Option<SectionInfo>,
}

impl FilterBuilder {
    /// 创建新的筛选索引构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 格式的简历数据创建构建器
    pub fn from_json(payload_json: &str) -> Result<Self, String> {
        let payload: Payload = serde_json::from_str(payload_json)
            .map_err(|e| format!("解析简历数据失败: {}", e))?;

        let mut builder = Self::new();
        builder.add_payload(payload);
        Ok(builder)
    }

    /// 添加记录到索引构建器
    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// 合并一份简历数据，已有栏目信息时保留先到的
    pub fn add_payload(&mut self, payload: Payload) {
        if self.section.is_none() {
            self.section = payload.section;
        }
        self.records.extend(payload.publications);
    }

    /// 获取构建器中的记录数量
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// 构建筛选索引
    pub fn build_filter_index(&self) -> Result<FilterIndex, String> {
        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.id.as_str()) {
                logging::error(&format!("错误: 记录ID重复: {}", record.id));
                return Err(format!("无法构建索引: 记录ID重复 '{}'", record.id));
            }
        }

        if self.records.is_empty() {
            logging::log("警告: 没有记录数据，将构建空索引");
        }

        let facets = facets(&self.records);
        logging::log(&format!(
            "索引构建完成，记录数量: {}, 分面数量: {}",
            self.records.len(),
            facets.len()
        ));

        Ok(FilterIndex {
            metadata: IndexMetadata {
                record_count: self.records.len(),
                facet_count: facets.len(),
                created_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            section: self.section.clone().unwrap_or_default(),
            records: self.records.clone(),
            facets,
        })
    }

    /// 保存筛选索引到文件
    pub fn save_filter_index(&self, path: &str) -> Result<(), String> {
        logging::log(&format!("开始保存筛选索引到文件: {}", path));

        let compressed_data = self.build_filter_index()?.to_compressed()?;

        let mut filter_file = File::create(path)
            .map_err(|e| format!("无法创建筛选索引文件: {}", e))?;
        filter_file
            .write_all(&compressed_data)
            .map_err(|e| format!("无法写入筛选索引文件: {}", e))?;

        logging::log(&format!(
            "筛选索引已成功写入文件: {}，大小: {} 字节",
            path,
            compressed_data.len()
        ));
        Ok(())
    }
}
