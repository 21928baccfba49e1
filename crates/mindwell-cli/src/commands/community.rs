use clap::Subcommand;

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum CommunityAction {
    /// Share a post with the community
    Post { content: String },
    /// List your posts
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CommunityAction) -> CliResult {
    match action {
        CommunityAction::Post { content } => {
            let mut svc = open_service()?;
            let events = svc.post_community(&content)?;
            svc.flush()?;
            println!("Posted.");
            print_unlocks(&events);
        }
        CommunityAction::List { limit, json } => {
            let svc = open_service()?;
            let posts: Vec<_> = svc
                .store()
                .community_posts
                .iter()
                .rev()
                .take(limit)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                for post in posts {
                    println!("{}  {}", post.date.format("%Y-%m-%d %H:%M"), post.content);
                }
            }
        }
    }
    Ok(())
}
