use std::path::PathBuf;

use noticelens_server::ServerConfig;

/// `serve` flags as given on the command line. `None` means not passed.
#[derive(Debug, Default)]
pub struct ServeFlags {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub echo_auth: bool,
}

impl ServeFlags {
    /// Layer the explicit flags over `base`.
    pub fn apply(self, base: ServerConfig) -> ServerConfig {
        ServerConfig {
            port: self.port.unwrap_or(base.port),
            host: self.host.unwrap_or(base.host),
            public_dir: self.public_dir.unwrap_or(base.public_dir),
            echo_auth: self.echo_auth || base.echo_auth,
        }
    }
}

pub fn run(flags: ServeFlags) {
    super::init_logging("info");

    let config = flags.apply(ServerConfig::from_env());

    let base = format!("http://localhost:{}", config.port);
    println!("📄 NoticeLens Server v{}", noticelens_core::VERSION);
    println!("   {base}");
    println!("   serving {}", config.public_dir.display());
    println!();
    println!("   Routes:");
    println!("     GET /<asset>          Files under the asset root");
    println!("     GET /*                Anything else: index.html");
    if config.echo_auth {
        println!("     POST /register        Echo auth (development)");
        println!("     POST /login           Echo auth (development)");
    }
    println!();

    let rt = super::runtime();
    if let Err(e) = rt.block_on(noticelens_server::run_server(config)) {
        super::fail(e);
    }
}
