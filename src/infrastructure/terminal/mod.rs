//! Terminal Rendering - 终端输出
//!
//! 把控制器状态渲染为纯文本，可选 ANSI 颜色

mod render;

pub use render::{render_batch, render_credential_status, render_single, RenderOptions};
