//! cvrank - 简历分析与排名客户端
//!
//! 每次调用即一个会话：构建控制器（读取一次已保存的凭证），
//! 把命令行参数转换为 UserAction 分发，最后渲染控制器状态。

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use cvrank::application::workflow::{AnalysisOutcome, WorkflowConfig};
use cvrank::application::{UserAction, WorkflowController, WorkflowState};
use cvrank::config::{load_config_from_path, print_config, AppConfig, LogConfig};
use cvrank::domain::submission::{ResumeFile, Submission, SubmissionValidator};
use cvrank::infrastructure::adapters::{HttpAnalysisClient, HttpAnalysisClientConfig};
use cvrank::infrastructure::persistence::sled::{SledCredentialConfig, SledCredentialStore};
use cvrank::infrastructure::terminal::{
    render_batch, render_credential_status, render_single, RenderOptions,
};

#[derive(Parser, Debug)]
#[command(name = "cvrank", version, about = "Analyze and rank resumes against a job description")]
struct Cli {
    /// 配置文件路径（默认搜索 cvrank.toml / cvrank.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 禁用彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// 单份简历：技能与修改建议
    Suggest {
        file: PathBuf,
        #[command(flatten)]
        job: JobDescriptionArgs,
        /// 本次请求使用的 API key，成功后保存
        #[arg(long, env = "CVRANK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// 多份简历按职位描述排名
    Rank {
        files: Vec<PathBuf>,
        #[command(flatten)]
        job: JobDescriptionArgs,
        #[arg(long, env = "CVRANK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// 依次切换展开的排名（从 1 开始，可重复）
        #[arg(long = "expand", value_name = "RANK")]
        expand: Vec<usize>,
    },
    /// 仅上传简历文件
    Upload { file: PathBuf },
    /// API key 管理
    Key {
        #[command(subcommand)]
        cmd: KeyCmd,
    },
}

#[derive(Subcommand, Debug)]
enum KeyCmd {
    Status,
    Set { key: String },
    Clear,
}

#[derive(Args, Debug)]
struct JobDescriptionArgs {
    /// 职位描述文本
    #[arg(long, conflicts_with = "job_desc_file")]
    job_desc: Option<String>,

    /// 从文件读取职位描述
    #[arg(long)]
    job_desc_file: Option<PathBuf>,
}

impl JobDescriptionArgs {
    async fn resolve(self) -> anyhow::Result<Option<String>> {
        match (self.job_desc, self.job_desc_file) {
            (Some(text), _) => Ok(Some(text)),
            (None, Some(path)) => {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("read job description {}", path.display()))?;
                Ok(Some(text))
            }
            (None, None) => Ok(None),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    print_config(&config);

    let options = RenderOptions {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };
    let mut controller = build_controller(&config).await?;

    let ok = match cli.cmd {
        Cmd::Suggest { file, job, api_key } => {
            let job_description = job.resolve().await?;
            set_draft(&mut controller, api_key).await?;
            let file = read_resume(&file).await?;
            controller
                .dispatch(UserAction::Submit(Submission::single(file, job_description)))
                .await?;
            report(&controller, options)
        }
        Cmd::Rank {
            files,
            job,
            api_key,
            expand,
        } => {
            let job_description = job.resolve().await?.unwrap_or_default();
            set_draft(&mut controller, api_key).await?;
            let mut resumes = Vec::with_capacity(files.len());
            for path in &files {
                resumes.push(read_resume(path).await?);
            }
            controller
                .dispatch(UserAction::Submit(Submission::batch(resumes, job_description)))
                .await?;
            if matches!(controller.state(), WorkflowState::Success(_)) {
                for warning in apply_expansions(&mut controller, &expand).await {
                    eprintln!("Warning: {}", warning);
                }
            }
            report(&controller, options)
        }
        Cmd::Upload { file } => {
            let file = read_resume(&file).await?;
            match controller.upload(file).await {
                Ok(message) => {
                    println!("{}", message);
                    true
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    false
                }
            }
        }
        Cmd::Key { cmd } => run_key_command(&mut controller, cmd).await,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},cvrank={}", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_controller(config: &AppConfig) -> anyhow::Result<WorkflowController> {
    if let Some(parent) = Path::new(&config.credential.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let credentials = Arc::new(SledCredentialStore::new(&SledCredentialConfig {
        db_path: config.credential.db_path.clone(),
        key: config.credential.key.clone(),
    })?);

    let analysis = Arc::new(HttpAnalysisClient::new(
        HttpAnalysisClientConfig::new(&config.service.url)
            .with_timeout(config.service.timeout_secs),
    )?);

    let controller = WorkflowController::new(
        analysis,
        credentials,
        SubmissionValidator::new(config.submission.allowed_extensions.iter().cloned()),
        WorkflowConfig {
            register_credential_remotely: config.credential.register_remotely,
        },
    )?;
    Ok(controller)
}

async fn set_draft(
    controller: &mut WorkflowController,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    if let Some(key) = api_key {
        controller.dispatch(UserAction::EditCredential(key)).await?;
    }
    Ok(())
}

/// 依次切换展开行；无效的排名只产生警告，已得到的结果照常渲染
async fn apply_expansions(controller: &mut WorkflowController, ranks: &[usize]) -> Vec<String> {
    let mut warnings = Vec::new();
    for &rank in ranks {
        let Some(index) = rank.checked_sub(1) else {
            warnings.push(format!("ignoring --expand {}: ranks start at 1", rank));
            continue;
        };
        if let Err(err) = controller.dispatch(UserAction::ToggleRow(index)).await {
            warnings.push(format!("ignoring --expand {}: {}", rank, err));
        }
    }
    warnings
}

async fn read_resume(path: &Path) -> anyhow::Result<ResumeFile> {
    ResumeFile::read(path)
        .await
        .with_context(|| format!("read resume {}", path.display()))
}

/// 渲染控制器状态，失败时返回 false
fn report(controller: &WorkflowController, options: RenderOptions) -> bool {
    if let Some(message) = controller.credential().error() {
        eprintln!("Warning: {}", message);
    }

    match controller.state() {
        WorkflowState::Success(AnalysisOutcome::Single(result)) => {
            print!("{}", render_single(result));
            true
        }
        WorkflowState::Success(AnalysisOutcome::Batch(_)) => {
            let rows = controller.rows().unwrap_or_default();
            print!(
                "{}",
                render_batch(
                    &rows,
                    controller.expanded_row(),
                    &controller.job_description_display(),
                    options,
                )
            );
            true
        }
        WorkflowState::Failure(message) => {
            eprintln!("Error: {}", message);
            false
        }
        other => {
            eprintln!("Error: analysis ended in unexpected state {}", other);
            false
        }
    }
}

async fn run_key_command(controller: &mut WorkflowController, cmd: KeyCmd) -> bool {
    let result = match cmd {
        KeyCmd::Status => {
            println!("{}", render_credential_status(controller.credential()));
            return true;
        }
        KeyCmd::Set { key } => {
            let mut result = Ok(());
            for action in [
                UserAction::ShowCredentialForm,
                UserAction::EditCredential(key),
                UserAction::ConfirmCredential,
            ] {
                result = controller.dispatch(action).await;
                if result.is_err() {
                    break;
                }
            }
            result
        }
        KeyCmd::Clear => controller.dispatch(UserAction::ClearCredential).await,
    };

    match result {
        Ok(()) => {
            println!("{}", render_credential_status(controller.credential()));
            true
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            false
        }
    }
}
