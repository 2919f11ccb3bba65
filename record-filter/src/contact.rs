use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// regex 不支持前瞻，开头的点和连续的点在 is_valid_email 中单独检查
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("邮箱正则无效")
});

/// 模拟提交成功后的提示
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully! (This is a demo)";

/// 联系表单
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// 字段校验错误
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// 模拟提交回执，不会真正发送
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub name: String,
    pub email: String,
    pub message: &'static str,
}

fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

impl ContactForm {
    /// 校验所有字段，按字段顺序返回全部错误
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if !has_min_chars(&self.name, 2) {
            errors.push(FieldError {
                field: "name",
                message: "Name must be at least 2 characters.",
            });
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address.",
            });
        }
        if !has_min_chars(&self.subject, 5) {
            errors.push(FieldError {
                field: "subject",
                message: "Subject must be at least 5 characters.",
            });
        }
        if !has_min_chars(&self.message, 10) {
            errors.push(FieldError {
                field: "message",
                message: "Message must be at least 10 characters.",
            });
        }

        errors
    }

    /// 校验并模拟提交
    pub fn submit(&self) -> Result<ContactReceipt, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactReceipt {
            name: self.name.clone(),
            email: self.email.clone(),
            message: SUBMITTED_MESSAGE,
        })
    }
}
