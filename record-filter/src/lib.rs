use wasm_bindgen::prelude::*;

// 导出模块
pub mod builder;
pub mod contact;
pub mod filter;
pub mod logging;
pub mod models;

pub use builder::FilterBuilder;
pub use contact::{ContactForm, ContactReceipt, FieldError};
pub use filter::{apply, facets, RecordFilter};
pub use models::{Criteria, FilterIndex, FilterParams, FilterResult, Payload, Selector};
pub use utils_common::models::{Category, Record, SectionInfo};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(message: String) -> JsValue {
    logging::error(&message);
    JsValue::from_str(&message)
}

/// 记录过滤器JS接口 - 每个实例持有自己的记录集合
#[wasm_bindgen]
pub struct RecordFilterJS {
    filter: RecordFilter,
    section: SectionInfo,
    facets: Vec<String>,
}

impl From<FilterIndex> for RecordFilterJS {
    fn from(index: FilterIndex) -> Self {
        Self {
            section: index.section.clone(),
            facets: index.facets.clone(),
            filter: RecordFilter::from(index),
        }
    }
}

#[wasm_bindgen]
impl RecordFilterJS {
    /// 从压缩索引初始化过滤器
    #[wasm_bindgen(constructor)]
    pub fn new(index_data: &[u8]) -> Result<RecordFilterJS, JsValue> {
        let index = FilterIndex::from_compressed(index_data)
            .map_err(|e| to_js_error(format!("初始化过滤器失败: {}", e)))?;
        logging::log(&format!("过滤器已加载，记录数量: {}", index.records.len()));
        Ok(Self::from(index))
    }

    /// 从 JSON 简历数据初始化过滤器
    pub fn from_json(payload_json: &str) -> Result<RecordFilterJS, JsValue> {
        let index = FilterBuilder::from_json(payload_json)
            .and_then(|builder| builder.build_filter_index())
            .map_err(to_js_error)?;
        Ok(Self::from(index))
    }

    /// 筛选记录
    pub fn filter_records(&self, params_json: &str) -> Result<JsValue, JsValue> {
        let params: FilterParams = serde_json::from_str(params_json)
            .map_err(|e| to_js_error(format!("解析参数失败: {}", e)))?;
        let criteria = params.to_criteria().map_err(to_js_error)?;

        let result = self.filter.filter(&criteria);

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 获取所有分面值（年份）
    pub fn get_facets(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.facets)
            .map_err(|e| JsValue::from_str(&format!("序列化分面失败: {}", e)))
    }

    /// 获取所有类别，按标签页顺序
    pub fn get_categories() -> js_sys::Array {
        Category::ALL
            .iter()
            .map(|c| JsValue::from_str(c.as_str()))
            .collect()
    }

    /// 栏目标题和说明
    pub fn section(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.section)
            .map_err(|e| JsValue::from_str(&format!("序列化栏目信息失败: {}", e)))
    }

    pub fn record_count(&self) -> usize {
        self.filter.len()
    }
}

/// 校验联系表单，返回字段错误列表
#[wasm_bindgen]
pub fn validate_contact(form_json: &str) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_json::from_str(form_json)
        .map_err(|e| to_js_error(format!("解析表单失败: {}", e)))?;

    serde_wasm_bindgen::to_value(&form.validate())
        .map_err(|e| JsValue::from_str(&format!("序列化校验结果失败: {}", e)))
}

/// 模拟提交联系表单，校验失败时返回字段错误列表
#[wasm_bindgen]
pub fn submit_contact(form_json: &str) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_json::from_str(form_json)
        .map_err(|e| to_js_error(format!("解析表单失败: {}", e)))?;

    match form.submit() {
        Ok(receipt) => {
            logging::log(&format!("联系表单: {:?}", form));
            serde_wasm_bindgen::to_value(&receipt)
                .map_err(|e| JsValue::from_str(&format!("序列化回执失败: {}", e)))
        }
        Err(errors) => {
            let errors = serde_wasm_bindgen::to_value(&errors)
                .map_err(|e| JsValue::from_str(&format!("序列化校验结果失败: {}", e)))?;
            Err(errors)
        }
    }
}
