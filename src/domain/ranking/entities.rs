//! Ranking Context - Entities
//!
//! 字段与服务端响应体一一对应，客户端不做重排或改写

use serde::{Deserialize, Deserializer, Serialize};

/// 显式 null 与缺失字段同样取默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 单份简历分析结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 技能标签，保持服务端顺序
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// Markdown 格式的修改建议
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: String,
}

/// 批量模式下的候选人
///
/// 身份即其在结果序列中的位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub filename: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default)]
    pub analysis: Option<String>,
}

impl RankedCandidate {
    /// 姓名缺失或为空时回退到文件名
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.filename,
        }
    }
}

/// 批量排名结果
///
/// 顺序完全由服务端决定
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(default)]
    pub results: Vec<RankedCandidate>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RankedCandidate> {
        self.results.get(index)
    }
}
