//! 日志输出：wasm 下写浏览器控制台，本地构建写标准输出。

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(target_arch = "wasm32")]
pub fn error(message: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(message: &str) {
    println!("{}", message);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(message: &str) {
    eprintln!("{}", message);
}
