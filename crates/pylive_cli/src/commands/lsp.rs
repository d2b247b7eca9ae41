//! LSP command implementation

use miette::Result;

use pylive_core::LiveConfig;

use crate::utils::create_tokio_runtime;

pub fn run_lsp(config: LiveConfig) -> Result<()> {
    create_tokio_runtime()?.block_on(async {
        pylive_lsp::run(config).await;
    });
    Ok(())
}
