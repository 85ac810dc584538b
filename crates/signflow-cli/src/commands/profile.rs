//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Fields of a `profile set` invocation
#[derive(Debug, Default)]
struct ProfileUpdate {
    url: Option<String>,
    template_id: Option<String>,
    template_version: Option<String>,
    gemini_model: Option<String>,
    email_domain: Option<String>,
}

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Use { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            template_id,
            template_version,
            gemini_model,
            email_domain,
        } => set_profile(
            config,
            name,
            ProfileUpdate {
                url,
                template_id,
                template_version,
                gemini_model,
                email_domain,
            },
            formatter,
        ),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}URL: {}", indent, profile.gateway_url);
    let template = if profile.template_id.is_empty() {
        "(not set)"
    } else {
        profile.template_id.as_str()
    };
    println!("{}Template: {} v{}", indent, template, profile.template_version);
    if let Some(model) = &profile.gemini_model {
        println!("{}Gemini model: {}", indent, model);
    }
    if let Some(domain) = &profile.placeholder_domain {
        println!("{}Placeholder domain: {}", indent, domain);
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");
    if profile.template_id.is_empty() {
        println!(
            "{}",
            formatter.warning("No template id; create and submit will fail")
        );
    }

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile. Unset fields keep their current value.
fn set_profile(
    config: &mut Config,
    name: String,
    update: ProfileUpdate,
    formatter: &Formatter,
) -> Result<()> {
    let existing = config.profiles.get(&name).cloned();
    let action = if existing.is_some() { "Updated" } else { "Created" };

    let mut profile = existing.unwrap_or_default();
    if let Some(url) = update.url {
        profile.gateway_url = url;
    }
    if let Some(id) = update.template_id {
        profile.template_id = id;
    }
    if let Some(version) = update.template_version {
        profile.template_version = version;
    }
    if update.gemini_model.is_some() {
        profile.gemini_model = update.gemini_model;
    }
    if update.email_domain.is_some() {
        profile.placeholder_domain = update.email_domain;
    }

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.remove_profile(&name)?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Deleted profile '{}'", name))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn temp_config(dir: &tempfile::TempDir) -> Config {
        Config::load_from(&dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "test".to_string(),
            ProfileUpdate {
                url: Some("http://localhost:8080".to_string()),
                template_id: Some("tpl-1".to_string()),
                ..ProfileUpdate::default()
            },
            &formatter,
        )
        .unwrap();
        assert_eq!(config.profiles["test"].template_id, "tpl-1");
        assert_eq!(config.profiles["test"].template_version, "0.1");

        switch_profile(&mut config, "test".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "test");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "test");
    }

    #[test]
    fn test_set_keeps_unspecified_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let update = |template_id: &str| ProfileUpdate {
            template_id: Some(template_id.to_string()),
            ..ProfileUpdate::default()
        };
        set_profile(&mut config, "default".to_string(), update("tpl-a"), &formatter).unwrap();
        set_profile(
            &mut config,
            "default".to_string(),
            ProfileUpdate {
                email_domain: Some("corp.test".to_string()),
                ..ProfileUpdate::default()
            },
            &formatter,
        )
        .unwrap();

        let profile = config.active_profile().unwrap();
        assert_eq!(profile.template_id, "tpl-a");
        assert_eq!(profile.placeholder_domain.as_deref(), Some("corp.test"));
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
    }
}
