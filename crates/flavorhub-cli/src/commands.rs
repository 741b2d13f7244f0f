use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use flavorhub_server::{FlavorHubServer, ServerConfig};
use flavorhub_service::{RecipeService, ServiceError};
use flavorhub_store::JsonFileRecipeStore;
use flavorhub_types::{Recipe, RecipeDraft, RecipeId};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let data = cli.data_file();
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.data).await,
        Command::List(args) => cmd_list(&open_service(&data)?, args, &cli.format),
        Command::Show(args) => cmd_show(&open_service(&data)?, args, &cli.format),
        Command::Add(args) => cmd_add(&open_service(&data)?, args, &cli.format),
        Command::Rate(args) => cmd_rate(&open_service(&data)?, args, &cli.format),
        Command::Delete(args) => cmd_delete(&open_service(&data)?, args),
    }
}

fn open_service(data: &Path) -> anyhow::Result<RecipeService> {
    let store = JsonFileRecipeStore::open(data)?;
    Ok(RecipeService::new(Arc::new(store)))
}

async fn cmd_serve(args: ServeArgs, data: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if data.is_some() {
        config.data_file = data;
    }
    FlavorHubServer::from_config(config)?.serve().await?;
    Ok(())
}

fn cmd_list(service: &RecipeService, args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let recipes = if let Some(needle) = &args.search {
        service.search_by_name(needle)?
    } else if let Some(level) = &args.difficulty {
        service.list_by_difficulty(level)?
    } else if let Some(cuisine) = &args.cuisine {
        service.list_by_cuisine(cuisine)?
    } else {
        service.list_all()?
    };

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }
    if recipes.is_empty() {
        println!("No recipes.");
    }
    for recipe in &recipes {
        println!("{}", summary_line(recipe));
    }
    Ok(())
}

fn cmd_show(service: &RecipeService, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let recipe = service.get_required(RecipeId::new(args.id))?;
    print_recipe(&recipe, format)
}

fn cmd_add(service: &RecipeService, args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let draft = RecipeDraft {
        name: args.name,
        description: args.description,
        prep_time: args.prep,
        cook_time: args.cook,
        servings: args.servings,
        difficulty_level: args.difficulty,
        cuisine_type: args.cuisine,
    };
    let recipe = service.create(draft)?;
    if let OutputFormat::Text = format {
        println!("{} Added recipe {}", "✓".green().bold(), format!("#{}", recipe.id).yellow());
    }
    print_recipe(&recipe, format)
}

fn cmd_rate(service: &RecipeService, args: RateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let recipe = service.rate(RecipeId::new(args.id), args.rating)?;
    if let OutputFormat::Text = format {
        println!(
            "{} Rated {} with {}",
            "✓".green().bold(),
            recipe.name.bold(),
            "★".repeat(args.rating as usize).yellow()
        );
    }
    print_recipe(&recipe, format)
}

fn cmd_delete(service: &RecipeService, args: DeleteArgs) -> anyhow::Result<()> {
    let id = RecipeId::new(args.id);
    match service.get_required(id) {
        Ok(recipe) => {
            service.delete(id)?;
            println!("Deleted recipe {} ({})", format!("#{id}").yellow(), recipe.name);
        }
        Err(ServiceError::NotFound(_)) => println!("No recipe {}", format!("#{id}").yellow()),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recipe)?),
        OutputFormat::Text => {
            println!("{}", summary_line(recipe));
            if !recipe.description.is_empty() {
                println!("  {}", recipe.description);
            }
            if let Some(servings) = recipe.servings {
                println!("  Serves: {servings}");
            }
            if let (Some(prep), Some(cook)) = (recipe.prep_time, recipe.cook_time) {
                println!("  Prep: {prep} min, Cook: {cook} min");
            }
        }
    }
    Ok(())
}

fn summary_line(recipe: &Recipe) -> String {
    let rating = if recipe.rating.is_unrated() {
        "unrated".dimmed().to_string()
    } else {
        format!(
            "★ {:.1} ({} ratings)",
            recipe.rating.rounded_average(1),
            recipe.rating.rating_count
        )
        .yellow()
        .to_string()
    };
    let mut tags: Vec<&str> = Vec::new();
    if let Some(level) = &recipe.difficulty_level {
        tags.push(level);
    }
    if let Some(cuisine) = &recipe.cuisine_type {
        tags.push(cuisine);
    }
    let time = recipe
        .total_time()
        .map(|m| format!(" · {m} min"))
        .unwrap_or_default();
    format!(
        "{} {}  {}  {}{}",
        format!("#{}", recipe.id).yellow(),
        recipe.name.bold(),
        rating,
        tags.join(" · ").cyan(),
        time
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_in(dir: &tempfile::TempDir) -> RecipeService {
        open_service(&dir.path().join("recipes.json")).unwrap()
    }

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.into(),
            description: String::new(),
            prep: Some(5),
            cook: Some(10),
            servings: None,
            difficulty: Some("Easy".into()),
            cuisine: Some("French".into()),
        }
    }

    #[test]
    fn add_then_rate_persists() {
        let dir = tempfile::tempdir().unwrap();
        cmd_add(&service_in(&dir), add_args("Crêpes"), &OutputFormat::Text).unwrap();
        cmd_rate(&service_in(&dir), RateArgs { id: 1, rating: 4 }, &OutputFormat::Json).unwrap();

        let recipe = service_in(&dir).get_required(RecipeId::new(1)).unwrap();
        assert_eq!(recipe.rating.rating_count, 1);
        assert_eq!(recipe.rating.average_rating, 4.0);
    }

    #[test]
    fn rate_out_of_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        cmd_add(&service_in(&dir), add_args("Quiche"), &OutputFormat::Json).unwrap();
        let err = cmd_rate(&service_in(&dir), RateArgs { id: 1, rating: 9 }, &OutputFormat::Text)
            .unwrap_err();
        assert!(err.to_string().contains("rating out of range"));
    }

    #[test]
    fn show_unknown_recipe_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_show(&service_in(&dir), ShowArgs { id: 5 }, &OutputFormat::Text).is_err());
    }

    #[test]
    fn delete_removes_recipe() {
        let dir = tempfile::tempdir().unwrap();
        cmd_add(&service_in(&dir), add_args("Soufflé"), &OutputFormat::Json).unwrap();
        cmd_delete(&service_in(&dir), DeleteArgs { id: 1 }).unwrap();
        cmd_delete(&service_in(&dir), DeleteArgs { id: 1 }).unwrap();
        assert!(service_in(&dir).list_all().unwrap().is_empty());
    }

    #[test]
    fn list_handles_filters() {
        let dir = tempfile::tempdir().unwrap();
        cmd_add(&service_in(&dir), add_args("Ratatouille"), &OutputFormat::Json).unwrap();
        let args = ListArgs {
            difficulty: None,
            cuisine: Some("French".into()),
            search: None,
        };
        cmd_list(&service_in(&dir), args, &OutputFormat::Text).unwrap();
    }

    #[test]
    fn summary_mentions_rating() {
        let mut recipe = Recipe::from_draft(RecipeId::new(2), RecipeDraft::new("Tarte Tatin"));
        assert!(summary_line(&recipe).contains("unrated"));
        recipe.rating = flavorhub_types::RatingAggregate::new(11.0 / 3.0, 3);
        assert!(summary_line(&recipe).contains("3.7 (3 ratings)"));
    }
}
