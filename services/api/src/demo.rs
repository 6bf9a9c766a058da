use clap::Args;
use std::sync::Arc;
use superlists::config::AppConfig;
use superlists::error::AppError;
use superlists::lists::{ListId, ListRepository, ListService, LocalListRepository, Outcome};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Item text to submit; the first starts a new list, the rest are added to it.
    #[arg(long = "item", required = true)]
    pub(crate) items: Vec<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(LocalListRepository::in_memory());
    let service = ListService::new(repository.clone(), &config.lists);

    println!("To-do lists demo");
    let list = submit_all(&service, &args.items)?;

    match list {
        Some(id) => {
            println!("\nList {id}:");
            for item in repository.list_items(id)? {
                println!("  {}. {}", item.id, item.text);
            }
        }
        None => println!("\nNo list was created."),
    }
    println!(
        "Store holds {} list(s) and {} item(s).",
        repository.list_count()?,
        repository.item_count()?
    );
    Ok(())
}

/// Run every submission in order, returning the list they landed in.
fn submit_all<R>(service: &ListService<R>, items: &[String]) -> Result<Option<ListId>, AppError>
where
    R: ListRepository + 'static,
{
    let mut list = None;
    for text in items {
        let outcome = match list {
            None => service.create_list(text)?,
            Some(id) => service.add_item(id, text)?,
        };

        match &outcome {
            Outcome::Redirect(target) => {
                list = ListId::from_url(target).or(list);
                println!("  accepted {text:?} -> {target}");
            }
            Outcome::Render(view, _) => {
                println!(
                    "  rejected {text:?}: {} ({})",
                    outcome.error().unwrap_or_default(),
                    view.template()
                );
            }
        }
    }
    Ok(list)
}
