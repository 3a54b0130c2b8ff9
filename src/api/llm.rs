//! 模型查询模块
//!
//! 负责所有与模型服务（OpenRouter 兼容接口）的交互。
//! 每道题发送一条用户消息（题目文字，可附带配图），
//! 并用严格模式的 JSON Schema 约束响应只含一个 answer 字段。

use crate::config::Config;
use crate::error::AppError;
use anyhow::{Context, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageUrlArgs,
    ResponseFormat, ResponseFormatJsonSchema,
};
use async_openai::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

/// 答案形态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerShape {
    /// 自由文本
    FreeText,
    /// 选项序号
    ChoiceNumber,
}

/// 模型响应的约定载荷：只有一个 answer 字段
#[derive(Debug, Deserialize)]
struct AnswerPayload {
    answer: JsonValue,
}

/// 模型查询客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的模型客户端
    pub fn new(config: &Config) -> Self {
        let api_config = OpenAIConfig::new()
            .with_api_base(&config.llm_api_base_url)
            .with_api_key(&config.llm_api_key);
        Self {
            client: Client::with_config(api_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 向模型请求一个答案
    ///
    /// # 参数
    /// - `instruction`: 提问指令（题干与选项已经拼好）
    /// - `image`: 题目配图地址（可选，作为图片消息一并发送）
    /// - `shape`: 期望的答案形态
    ///
    /// # 返回
    /// 返回 answer 字段的原始 JSON 值；模型内容为空时返回 None
    pub async fn request_answer(
        &self,
        instruction: &str,
        image: Option<&str>,
        shape: AnswerShape,
    ) -> Result<Option<JsonValue>> {
        debug!("正在调用模型: {}", self.model_name);
        debug!("提问内容: {}", instruction);

        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
            ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(instruction)
                .build()
                .context("构造文本消息失败")?
                .into(),
        ];
        if let Some(url) = image {
            parts.push(
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(
                        ImageUrlArgs::default()
                            .url(url)
                            .build()
                            .context("构造图片地址失败")?,
                    )
                    .build()
                    .context("构造图片消息失败")?
                    .into(),
            );
        }

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(parts)
            .build()
            .context("构造用户消息失败")?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![message.into()])
            .response_format(answer_format(shape))
            .build()
            .context("构造模型请求失败")?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("模型 API 调用失败: {}", e);
            anyhow::anyhow!("模型 API 调用失败: {}", e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            debug!("模型返回内容为空");
            return Ok(None);
        }

        let payload: AnswerPayload = serde_json::from_str(&content)
            .map_err(|e| AppError::MalformedAnswer(format!("{}: {}", e, content)))?;
        debug!("模型作答: {}", payload.answer);

        Ok(Some(payload.answer))
    }
}

/// 构造严格模式的响应格式
///
/// 响应必须是 {"answer": ...} 形式的对象，
/// answer 按答案形态约束为字符串或数字，不允许其他字段
pub fn answer_format(shape: AnswerShape) -> ResponseFormat {
    let (answer_type, description) = match shape {
        AnswerShape::FreeText => ("string", "the answer to the question"),
        AnswerShape::ChoiceNumber => ("number", "the number of the correct choice"),
    };
    ResponseFormat::JsonSchema {
        json_schema: ResponseFormatJsonSchema {
            description: None,
            name: "answer".to_string(),
            schema: Some(json!({
                "type": "object",
                "properties": {
                    "answer": {
                        "type": answer_type,
                        "description": description,
                    }
                },
                "required": ["answer"],
                "additionalProperties": false,
            })),
            strict: Some(true),
        },
    }
}
