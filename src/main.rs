use anyhow::Result;
use auto_grade::utils::logging;
use auto_grade::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行一次评分会话
    App::initialize(config).await?.run().await?;

    Ok(())
}
