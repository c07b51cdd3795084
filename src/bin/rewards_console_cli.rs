use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

use rewards_console::{
    approvals::ApprovalQueue,
    campaign::{CampaignList, CampaignMetrics, CampaignWizard, TemplateApplier},
    config::{ConfigManager, ConsoleConfig},
    data::{DataProvider, SeedData},
    forms::FormFieldStore,
    init,
    notify::{ConsoleNotifier, NoNavigation},
    wizard::WizardEvent,
};

const CONFIG_DIR_ENV: &str = "REWARDS_CONSOLE_CONFIG_DIR";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let config = load_config()?;
    let provider = SeedData;

    match command.as_str() {
        "templates" => {
            for template in provider.templates() {
                println!(
                    "{:<22} {:<24} {:<18} {}",
                    template.id, template.name, template.campaign_type, template.duration
                );
            }
        }
        "apply" | "create" => {
            let template_id = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let template = provider
                .template(&template_id)
                .ok_or_else(|| format!("unknown template `{template_id}`"))?;
            let customizations = parse_assignments(args)?;
            if command == "apply" {
                let store = TemplateApplier::apply_template(&template, &customizations);
                println!("{}", serde_json::to_string_pretty(&store)?);
            } else {
                let campaign =
                    TemplateApplier::create_directly(&template, &customizations, &config.operator_name)?;
                println!("Campaign created: {}", campaign.name);
                println!("{}", serde_json::to_string_pretty(&campaign)?);
            }
        }
        "customize" => {
            let template_id = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let template = provider
                .template(&template_id)
                .ok_or_else(|| format!("unknown template `{template_id}`"))?;
            let customizations = parse_assignments(args)?;
            let mut wizard =
                TemplateApplier::customize_with_config(&template, &customizations, &config);
            print_step(&wizard);
            while wizard.advance()? == WizardEvent::Moved {
                print_step(&wizard);
            }
            for line in wizard.summary().lines() {
                println!("{line}");
            }
            let mut campaigns = CampaignList::new(provider.campaigns());
            let notifier = ConsoleNotifier {
                plain: !io::stdout().is_terminal(),
            };
            let campaign = wizard
                .submit(&mut campaigns, &notifier, &NoNavigation)
                .ok_or("campaign was not created")?;
            println!("{}", serde_json::to_string_pretty(&campaign)?);
        }
        "metrics" => {
            let fields = parse_assignments(args)?;
            let metrics = CampaignMetrics::from_fields(&fields);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        "queue" => {
            let queue = seeded_queue(&provider, &config);
            println!("Pending approvals: {}", queue.count());
            println!("{}", serde_json::to_string_pretty(queue.pending())?);
        }
        "approve" | "reject" => {
            let id = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let mut queue = seeded_queue(&provider, &config);
            queue.subscribe(|count: usize| println!("Pending approvals: {count}"));
            let notifier = ConsoleNotifier {
                plain: !io::stdout().is_terminal(),
            };
            let decided = if command == "approve" {
                queue.approve(&id, &config.operator_name, &notifier)
            } else {
                queue.reject(&id, &config.operator_name, &notifier)
            };
            if decided.is_none() {
                println!("No pending request with id {id}");
            }
        }
        "version" => {
            println!(
                "rewards_console_cli {} ({} {}, built {})",
                env!("CARGO_PKG_VERSION"),
                env!("REWARDS_CONSOLE_BUILD_HASH"),
                env!("REWARDS_CONSOLE_BUILD_PROFILE"),
                env!("REWARDS_CONSOLE_BUILD_TIMESTAMP"),
            );
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn load_config() -> Result<ConsoleConfig, Box<dyn std::error::Error>> {
    let manager = match env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => ConfigManager::with_base_dir(PathBuf::from(dir)),
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(err) => {
                tracing::debug!(%err, "no platform config directory, using defaults");
                return Ok(ConsoleConfig::default());
            }
        },
    };
    Ok(manager.load()?)
}

fn print_step(wizard: &CampaignWizard) {
    println!(
        "Step {}/{}: {}",
        wizard.current_step(),
        wizard.total_steps(),
        wizard.step_name()
    );
}

fn seeded_queue(provider: &impl DataProvider, config: &ConsoleConfig) -> ApprovalQueue {
    ApprovalQueue::from_requests(config.request_id_prefix.clone(), provider.pending_requests())
}

/// Parses `key=value` arguments; `key=a,b` with a `[]` suffix on the key
/// becomes a list (`channels[]=email,sms`).
fn parse_assignments(
    args: impl Iterator<Item = String>,
) -> Result<FormFieldStore, Box<dyn std::error::Error>> {
    let mut store = FormFieldStore::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{arg}`"))?;
        match key.strip_suffix("[]") {
            Some(list_key) => {
                for item in value.split(',').filter(|item| !item.is_empty()) {
                    store.set_list_field(list_key, item.trim(), true);
                }
            }
            None => store.set_field(key, value),
        }
    }
    store.mark_saved();
    Ok(store)
}

fn print_usage() {
    eprintln!(
        "Usage: rewards_console_cli <command>\n\
         Commands:\n  \
         templates\n  \
         apply <template-id> [key=value ...]\n  \
         create <template-id> name=<name> startDate=<YYYY-MM-DD> [key=value ...]\n  \
         customize <template-id> [key=value ...]\n  \
         metrics pointsPerAction=<n> expectedParticipants=<n> budget=<n>\n  \
         queue\n  \
         approve <request-id>\n  \
         reject <request-id>\n  \
         version"
    );
}
