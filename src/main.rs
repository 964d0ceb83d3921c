use anyhow::Context;
use clap::Parser;
use maritime_ops::core::service::VoyagePlan;
use maritime_ops::core::{carbon, checklist};
use maritime_ops::domain::model::Port;
use maritime_ops::domain::weather::WeatherReport;
use maritime_ops::utils::error::ErrorSeverity;
use maritime_ops::utils::{logger, validation::Validate};
use maritime_ops::{
    CliConfig, Command, LocalPortTable, MaritimeError, OpenMeteoClient, PortRegistry,
    RouteService, StormglassClient, TomlConfig, WeatherService,
};
use serde::Serialize;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        let exit_code = match e.downcast_ref::<MaritimeError>() {
            Some(err) => {
                tracing::error!(
                    "Command failed: {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                match err.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2, // retryable
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => {
            let settings = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path))?;
            settings.validate()?;
            settings
        }
        None => TomlConfig::default(),
    };

    let registry = match cli.port_table.as_deref().or(settings.port_table()) {
        Some(path) => PortRegistry::load(&LocalPortTable::new(path)).await?,
        None => PortRegistry::builtin(),
    };

    match &cli.command {
        Command::Distance {
            origin,
            destination,
            vessel,
        } => {
            let service = RouteService::new(Arc::new(registry), settings.estimator_config())?;
            let plan = service.plan(origin, destination, *vessel)?;
            if cli.json {
                print_json(&plan)?;
            } else {
                print_plan(&plan);
            }
        }
        Command::Port { identifier } => {
            let port = registry.resolve(identifier)?;
            if cli.json {
                print_json(port)?;
            } else {
                print_port(port);
            }
        }
        Command::Ports { search, category } => {
            let ports: Vec<&Port> = match (search, category) {
                (Some(query), category) => registry.search(query, *category),
                (None, Some(category)) => registry.by_category(*category),
                (None, None) => registry.iter().collect(),
            };
            if cli.json {
                print_json(&ports)?;
            } else {
                for port in &ports {
                    println!("{:<6} {:<16} {:<22} {}", port.code, port.name, port.country, port.coordinate);
                }
                println!("{} port(s)", ports.len());
            }
        }
        Command::Carbon {
            distance_nm,
            days,
            fuel,
            vessel,
        } => {
            let days = match days {
                Some(days) => *days,
                None => carbon::days_at_sea(settings.estimator_config(), *distance_nm, *vessel)?,
            };
            let estimate = carbon::estimate_emissions(*distance_nm, days, *fuel, *vessel)?;
            if cli.json {
                print_json(&estimate)?;
            } else {
                println!("🌍 {} vessel on {} for {:.2} days at sea", estimate.vessel_type, estimate.fuel, estimate.days_at_sea);
                println!("• Fuel: {:.2} t", estimate.fuel_tons);
                println!("• CO2: {:.2} t ({:.2} kg)", estimate.co2_tons, estimate.co2_kg);
            }
        }
        Command::Checklist { stage } => {
            let checklist = checklist::checklist_for(stage)?;
            if cli.json {
                print_json(&checklist)?;
            } else {
                println!("📋 {}", checklist.stage);
                for item in &checklist.items {
                    println!("[ ] {}", item);
                }
            }
        }
        Command::Weather { port, lat, lon } => {
            let timeout = settings.weather.timeout_seconds;
            let client = OpenMeteoClient::new(&settings.weather.endpoint, timeout)?;
            let mut service = WeatherService::new(client, &registry);
            if let Some(api_key) = settings.marine.credentials()? {
                let marine = StormglassClient::new(&settings.marine.endpoint, api_key, timeout)?;
                service = service.with_marine(marine);
            }

            let report = match (port, lat, lon) {
                (Some(port), _, _) => service.forecast_for_port(port).await?,
                (None, Some(lat), Some(lon)) => service.forecast_for_coordinates(*lat, *lon).await?,
                _ => {
                    return Err(MaritimeError::validation(
                        "weather needs a port or both --lat and --lon",
                    )
                    .into())
                }
            };
            if cli.json {
                print_json(&report)?;
            } else {
                print_weather(&report);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_plan(plan: &VoyagePlan) {
    let estimate = &plan.estimate;
    println!("📏 {} → {}", plan.origin_name, plan.destination_name);
    println!(
        "• Distance: {:.1} NM / {:.1} km / {:.1} mi",
        estimate.distance_nm, estimate.distance_km, estimate.distance_mi
    );
    println!(
        "• ETA at {} knots: {:.1} hours ({})",
        estimate.average_speed_knots, estimate.eta.total_hours, estimate.eta
    );
    println!("• Fuel: {:.1} t", estimate.fuel_tons);
    println!("• Estimated cost: {:.2}", estimate.estimated_cost);

    if !plan.alternative_speeds.is_empty() {
        println!("\nAlternative speeds:");
        for alt in &plan.alternative_speeds {
            println!("- {} knots: {:.1} hours ({})", alt.speed_knots, alt.eta.total_hours, alt.eta);
        }
    }

    let insights = &plan.insights;
    println!("\nRoute type: {}", insights.route_class.as_str());
    for zone in &insights.weather_zones {
        println!("- {}", zone);
    }
    for consideration in &insights.operational_considerations {
        println!("- {}", consideration);
    }
    println!("\nApproaches:");
    println!("- {}: {}", plan.origin_name, insights.origin_approach.notes);
    println!("- {}: {}", plan.destination_name, insights.destination_approach.notes);
}

fn print_port(port: &Port) {
    println!("🏠 {} ({}), {}", port.name, port.code, port.country);
    println!("• Coordinates: {}", port.coordinate);
    if let Some(draft) = port.max_draft_m {
        println!("• Max draft: {} m", draft);
    }
    if let Some(tide) = port.tidal_range_m {
        println!("• Tidal range: {} m", tide);
    }
    if !port.facilities.is_empty() {
        println!("• Facilities: {}", port.facilities.join(", "));
    }
    if !port.restrictions.is_empty() {
        println!("• Restrictions: {}", port.restrictions.join(", "));
    }
}

fn print_weather(report: &WeatherReport) {
    let current = &report.current_weather;
    let show = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| v.to_string());

    println!("🌤️ Weather for {} ({})", report.port_name, report.coordinate);
    println!("• Temperature: {}°C", show(current.temperature));
    println!("• Wind: {} ({}°)", show(current.wind_speed), show(current.wind_direction));
    println!("• Conditions: {}", current.weather_description);

    for day in &report.daily_forecast {
        println!("- {}: max {}°C, precipitation {}", day.date, show(day.max_temp), show(day.precipitation));
    }

    let insights = &report.maritime_insights;
    if !insights.operational_impact.is_empty() {
        println!("\nOperational Impact:");
        for impact in &insights.operational_impact {
            println!("- {}", impact);
        }
    }
    if !insights.safety_considerations.is_empty() {
        println!("\nSafety Considerations:");
        for s in &insights.safety_considerations {
            println!("- {}", s);
        }
    }
    if let Some(marine) = &report.marine {
        println!("\nMarine Conditions:");
        println!("• Wave height: {} m", show(marine.wave_height_m));
        println!("• Wave direction: {}°", show(marine.wave_direction_deg));
        println!("• Wave period: {} s", show(marine.wave_period_s));
    }
    println!("\nSource: {}", report.source);
}
