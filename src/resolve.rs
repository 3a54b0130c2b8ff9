//! 答案决定模块
//!
//! 先按题干上的身份规则路由（学号、姓名这类固定信息直接填写），
//! 路由不中的题目再按题型交给模型回答。

use crate::api::llm::{AnswerShape, LlmClient};
use crate::error::{AppError, AppResult};
use crate::models::{ClassifiedQuestion, IdentityProfile, QuestionKind};
use anyhow::Result;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// 身份路由结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// 填入邮箱（邮箱输入框）
    Email,
    /// 按班级序号选择单选项
    Class,
    /// 填入学号（文本输入框）
    Id,
    /// 填入姓名（文本输入框）
    Name,
    /// 交给模型回答
    Model,
}

type RulePredicate = fn(&str, &str) -> bool;

/// 身份路由规则表，顺序即优先级，先中先得
///
/// 每条规则拿到题干原文和小写化副本；"Email *" 是表单自带的
/// 邮箱收集字段标题，按原文精确排除，让它落到模型路径。
static IDENTITY_RULES: &[(RulePredicate, Route)] = &[
    (is_email_prompt, Route::Email),
    (is_class_prompt, Route::Class),
    (is_id_prompt, Route::Id),
    (is_name_prompt, Route::Name),
];

fn is_email_prompt(prompt: &str, lowered: &str) -> bool {
    lowered.contains("mail") && prompt != "Email *"
}

fn is_class_prompt(_prompt: &str, lowered: &str) -> bool {
    lowered.contains("class")
}

fn is_id_prompt(_prompt: &str, lowered: &str) -> bool {
    lowered.contains("id")
}

fn is_name_prompt(prompt: &str, lowered: &str) -> bool {
    lowered.contains("name") || prompt.contains("名")
}

/// 按题干内容路由（大小写不敏感的子串匹配）
pub fn route(prompt: &str) -> Route {
    let lowered = prompt.to_lowercase();
    for (matches, route) in IDENTITY_RULES {
        if matches(prompt, &lowered) {
            return *route;
        }
    }
    Route::Model
}

/// 单题的作答决定
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// 在文本输入框中填入字符串
    FillText(String),
    /// 在邮箱输入框中填入字符串
    FillEmail(String),
    /// 选择第 index 个单选项
    PickRadio(usize),
    /// 展开下拉框后选择第 index 个选项
    PickDropdown(usize),
    /// 不作答
    Skip(SkipReason),
}

/// 不作答的原因
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// 未识别的题型
    UnknownKind,
    /// 模型未给出答案
    NoAnswer,
    /// 答案不符合约定（类型或范围）
    InvalidAnswer,
}

impl SkipReason {
    /// 原因的日志描述
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::UnknownKind => "未识别的题型",
            SkipReason::NoAnswer => "模型未给出答案",
            SkipReason::InvalidAnswer => "答案不符合约定",
        }
    }
}

/// 决定一道题怎么作答
///
/// 身份规则优先于模型；选项类答案在这里完成范围校验，
/// 校验不过的按不作答处理而不是报错。
pub async fn resolve(
    profile: &IdentityProfile,
    llm: &LlmClient,
    question: &ClassifiedQuestion,
) -> Result<Resolution> {
    match route(&question.prompt) {
        Route::Email => {
            debug!("命中邮箱规则");
            Ok(Resolution::FillEmail(profile.email.clone()))
        }
        Route::Class => {
            debug!("命中班级规则");
            match checked_choice_index(profile.class_index, question.choices.len()) {
                Ok(index) => Ok(Resolution::PickRadio(index)),
                Err(e) => {
                    warn!("⚠️ 班级序号不可用: {}", e);
                    Ok(Resolution::Skip(SkipReason::InvalidAnswer))
                }
            }
        }
        Route::Id => {
            debug!("命中学号规则");
            Ok(Resolution::FillText(profile.id.clone()))
        }
        Route::Name => {
            debug!("命中姓名规则");
            Ok(Resolution::FillText(profile.name.clone()))
        }
        Route::Model => resolve_with_model(llm, question).await,
    }
}

/// 把题目交给模型回答
async fn resolve_with_model(llm: &LlmClient, question: &ClassifiedQuestion) -> Result<Resolution> {
    match question.kind {
        QuestionKind::Text => {
            let instruction = free_text_instruction(&question.prompt);
            let answer = match llm
                .request_answer(&instruction, question.image.as_deref(), AnswerShape::FreeText)
                .await?
            {
                Some(answer) => answer,
                None => return Ok(Resolution::Skip(SkipReason::NoAnswer)),
            };
            match answer.as_str() {
                Some(text) => Ok(Resolution::FillText(text.to_string())),
                None => {
                    warn!("⚠️ 模型未按文本作答: {}", answer);
                    Ok(Resolution::Skip(SkipReason::InvalidAnswer))
                }
            }
        }
        QuestionKind::Radio | QuestionKind::Dropdown => {
            let instruction = choice_instruction(&question.prompt, &question.choices);
            let answer = match llm
                .request_answer(
                    &instruction,
                    question.image.as_deref(),
                    AnswerShape::ChoiceNumber,
                )
                .await?
            {
                Some(answer) => answer,
                None => return Ok(Resolution::Skip(SkipReason::NoAnswer)),
            };
            match parse_choice_answer(&answer, question.choices.len()) {
                Ok(index) => Ok(if question.kind == QuestionKind::Radio {
                    Resolution::PickRadio(index)
                } else {
                    Resolution::PickDropdown(index)
                }),
                Err(e) => {
                    warn!("⚠️ 放弃该题: {}", e);
                    Ok(Resolution::Skip(SkipReason::InvalidAnswer))
                }
            }
        }
        QuestionKind::Unknown => Ok(Resolution::Skip(SkipReason::UnknownKind)),
    }
}

/// 文本题的提问指令
pub fn free_text_instruction(prompt: &str) -> String {
    format!("answer the question: {}", prompt)
}

/// 选择题的提问指令：题干加上 "序号. 选项" 的枚举列表
///
/// 列表顺序与页面选项的文档顺序一致，模型答的序号直接落回同一顺序
pub fn choice_instruction(prompt: &str, choices: &[String]) -> String {
    let mut lines = vec![format!("answer the question by the choice number: {}", prompt)];
    for (index, label) in choices.iter().enumerate() {
        lines.push(format!("{}. {}", index, label));
    }
    lines.join("\n")
}

/// 校验选项序号落在 [0, count) 内
pub fn checked_choice_index(index: usize, count: usize) -> AppResult<usize> {
    if index >= count {
        return Err(AppError::ChoiceOutOfRange { index, count });
    }
    Ok(index)
}

/// 从模型回答中取出选项序号
///
/// 只接受 JSON 整数，小数和数字字符串都视为无效；序号必须落在范围内
pub fn parse_choice_answer(answer: &JsonValue, count: usize) -> AppResult<usize> {
    let index = answer
        .as_u64()
        .ok_or_else(|| AppError::MalformedAnswer(answer.to_string()))?;
    checked_choice_index(index as usize, count)
}
