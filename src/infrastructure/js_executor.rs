//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"的能力。
//! 传给页面脚本的参数一律经 JSON 编码，调用方不需要自己拼接转义。

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() / call() 能力
/// - 不认识账号 / 投稿 / 按钮
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于导航、Cookie 等非脚本操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 表达式并返回 JSON 结果
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 表达式
    ///
    /// # 返回
    /// 表达式的值；脚本抛出异常时返回 `AppError::Script`
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self
            .page
            .evaluate(js_code.into())
            .await
            .map_err(|e| AppError::Script(e.to_string()))?;
        Ok(result.into_value()?)
    }

    /// 执行 JS 表达式并反序列化为指定类型
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 表达式
    ///
    /// # 返回
    /// 反序列化后的值
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        Ok(serde_json::from_value(json_value)?)
    }

    /// 以一个参数调用页面内的箭头函数
    ///
    /// # 参数
    /// - `function`: 函数源码，例如 `(sel) => !!document.querySelector(sel)`
    /// - `arg`: 参数，经 JSON 编码后传入
    ///
    /// # 返回
    /// 函数返回值反序列化后的结果
    pub async fn call<A, T>(&self, function: &str, arg: &A) -> AppResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.eval_as(invocation(function, arg)?).await
    }
}

/// 生成 `(function)(arg)` 形式的调用表达式
fn invocation<A: Serialize + ?Sized>(function: &str, arg: &A) -> AppResult<String> {
    Ok(format!("({})({})", function.trim(), serde_json::to_string(arg)?))
}
