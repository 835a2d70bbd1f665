use anyhow::Context;
use eth_chain_client::config::Config;
use eth_chain_client::log_info;
use eth_chain_client::startup::Application;
use eth_chain_client::utils::logger::init_logger;

/// 用法: eth-chain-client [TX_HASH]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 读取 .env（不存在时忽略）
    dotenvy::dotenv().ok();

    // 初始化日志（全局只需调用一次）
    init_logger();

    log_info!("Starting eth-chain-client...");

    // 1. 加载配置
    let config = Config::load().context("Failed to load application configuration")?;

    // 2. 构建应用实例
    let application = Application::build(config);

    // 3. 可选参数：等待该交易的收据
    let tx_hash = std::env::args().nth(1);

    application
        .run(tx_hash)
        .await
        .context("Chain query failed")?;

    Ok(())
}
