use anidex::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all().thread_name("anidex-worker");

    // 0 leaves the choice to tokio (one worker per core).
    if config.general.worker_threads > 0 {
        runtime.worker_threads(config.general.worker_threads);
    }

    runtime.build()?.block_on(anidex::run(config))
}
