use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "svc-cli")]
#[command(about = "Command-line client for the svc API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8085")]
    url: String,

    #[arg(short, long, default_value = "/svcApi")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one service by id
    Find { id: i64 },
    /// Create a service
    Add {
        /// Port kind (e.g. ClusterIP)
        #[arg(long = "type")]
        svc_type: Option<String>,
        #[arg(long)]
        port: Option<i32>,
        #[arg(long)]
        target_port: Option<i32>,
        #[arg(long)]
        protocol: Option<String>,
        /// Extra form field, repeatable (e.g. --field svc_name=web)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete one service by id
    Delete { id: i64 },
    /// List all services
    List,
    /// Call the update operation
    Update,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.prefix);

    let res = match cli.command {
        Commands::Find { id } => {
            client
                .get(format!("{}/findSvcById", base))
                .query(&[("svc_id", id)])
                .send()
                .await?
        }
        Commands::Add {
            svc_type,
            port,
            target_port,
            protocol,
            fields,
        } => {
            let mut form = fields;
            if let Some(t) = svc_type {
                form.push(("svc_type".into(), t));
            }
            if let Some(p) = port {
                form.push(("svc_port".into(), p.to_string()));
            }
            if let Some(p) = target_port {
                form.push(("svc_target_port".into(), p.to_string()));
            }
            if let Some(p) = protocol {
                form.push(("svc_port_protocol".into(), p));
            }
            client
                .post(format!("{}/addSvc", base))
                .form(&form)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .post(format!("{}/deleteSvcById", base))
                .query(&[("svc_id", id)])
                .send()
                .await?
        }
        Commands::List => client.get(format!("{}/call", base)).send().await?,
        Commands::Update => client.post(format!("{}/updateSvc", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: svc API returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
