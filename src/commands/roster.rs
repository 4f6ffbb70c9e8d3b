use clap::{Args, ValueEnum};

use squadlist::{AppState, NewItem, Position, SyncService};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Reads the state left behind by a sync operation; a recorded error
/// becomes the command error.
fn take_state(service: &SyncService) -> Result<AppState, Box<dyn std::error::Error>> {
    let state = service.store().state();
    match state.error {
        Some(error) => Err(error.into()),
        None => Ok(state),
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show only completed items
    #[arg(long, conflicts_with = "pending")]
    completed: bool,

    /// Show only pending items
    #[arg(long)]
    pending: bool,

    /// Show only items whose title contains TEXT
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,
}

impl ListCommand {
    pub async fn run(&self, service: &SyncService) -> Result<(), Box<dyn std::error::Error>> {
        service.list().await;
        let state = take_state(service)?;

        let items: Vec<_> = state
            .items
            .into_iter()
            .filter(|item| {
                if self.completed && !item.completed {
                    return false;
                }
                if self.pending && item.completed {
                    return false;
                }
                match &self.search {
                    Some(text) => item.title.to_lowercase().contains(&text.to_lowercase()),
                    None => true,
                }
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Text => {
                if items.is_empty() {
                    println!("No items");
                } else {
                    for item in &items {
                        println!("{}", item);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct AddCommand {
    /// Title of the new item
    title: String,

    /// Playing position
    #[arg(long, value_enum)]
    position: Option<Position>,
}

impl AddCommand {
    pub async fn run(&self, service: &SyncService) -> Result<(), Box<dyn std::error::Error>> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".into());
        }

        // Fetch first so the new item lands on top of the real collection.
        service.list().await;
        take_state(service)?;

        let mut fields = NewItem::new(self.title.trim());
        if let Some(position) = self.position {
            fields = fields.with_position(position);
        }
        service.create(fields).await;

        let state = take_state(service)?;
        if let Some(created) = state.items.first() {
            println!("Added {}", created);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct StatusCommand {
    /// Item id
    id: u64,
}

impl StatusCommand {
    pub async fn run(
        &self,
        service: &SyncService,
        completed: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        service.list().await;
        take_state(service)?;

        service.update_status(self.id, completed).await;

        let state = take_state(service)?;
        match state.items.iter().find(|item| item.id == self.id) {
            Some(item) => println!("{}", item),
            None => println!("No item with id {}", self.id),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct RemoveCommand {
    /// Item id
    id: u64,
}

impl RemoveCommand {
    pub async fn run(&self, service: &SyncService) -> Result<(), Box<dyn std::error::Error>> {
        service.list().await;
        take_state(service)?;

        service.delete(self.id).await;
        take_state(service)?;

        println!("Removed item {}", self.id);
        Ok(())
    }
}
