//! Show dataset command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use pairlab_core::listing::{COUPLE_PAGE_SIZE, PageState, filter_dataset_annotators, paginate};
use pairlab_core::model::{AnnotationFilter, Couple, DatasetAnnotator, annotation_class_for};
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Dataset id
    pub id: i64,

    /// Only list annotators matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// Annotators to list: all, annotated or not-annotated
    #[arg(long, default_value = "all")]
    pub annotation_filter: AnnotationFilter,

    /// Couples page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Couples per page
    #[arg(long, default_value_t = COUPLE_PAGE_SIZE)]
    pub page_size: usize,

    /// Print the dataset as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CoupleRow<'a> {
    #[serde(flatten)]
    couple: &'a Couple,
    class: Option<&'a str>,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    id: i64,
    name: Option<&'a str>,
    description: Option<&'a str>,
    total_text_pairs: usize,
    current_page: usize,
    total_pages: usize,
    couples: Vec<CoupleRow<'a>>,
    annotators: &'a [DatasetAnnotator],
}

pub async fn run(args: ShowArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let details = session
        .dataset_details(args.id)
        .await
        .context("Failed to fetch dataset")?;
    let annotators = session
        .dataset_annotators(args.id)
        .await
        .context("Failed to fetch dataset annotators")?;

    let page = PageState::new(args.page_size)
        .go_to(args.page, details.couple_texts.len());
    let couples: Vec<CoupleRow<'_>> = paginate(&details.couple_texts, &page)
        .iter()
        .map(|couple| CoupleRow {
            couple,
            class: annotation_class_for(&annotators, couple.id),
        })
        .collect();

    let shown = filter_dataset_annotators(
        &annotators,
        args.search.as_deref().unwrap_or_default(),
        args.annotation_filter,
    );

    if args.json {
        return output::json_pretty(&ShowOutput {
            id: details.id.unwrap_or(args.id),
            name: details.name.as_deref(),
            description: details.description.as_deref(),
            total_text_pairs: details.total_text_pairs(),
            current_page: page.current(),
            total_pages: page.total_pages(details.couple_texts.len()),
            couples,
            annotators: &shown,
        });
    }

    output::field("Dataset", &details.id.unwrap_or(args.id).to_string());
    output::field("Name", details.name.as_deref().unwrap_or_default());
    output::field(
        "Description",
        details.description.as_deref().unwrap_or_default(),
    );
    output::field("Couples", &details.couple_texts.len().to_string());
    output::field("Assigned pairs", &details.total_text_pairs().to_string());

    println!();
    for row in &couples {
        let class = match row.class {
            Some(class) => class.green().to_string(),
            None => "not annotated".dimmed().to_string(),
        };
        println!("{:>5}  {}", row.couple.id, class);
        println!("       1: {}", row.couple.text_1);
        println!("       2: {}", row.couple.text_2);
    }
    output::note(&format!(
        "Page {}/{}",
        page.current(),
        page.total_pages(details.couple_texts.len())
    ));

    println!();
    if shown.is_empty() {
        output::note("No annotators match.");
    }
    for annotator in &shown {
        let name = [annotator.first_name.as_deref(), annotator.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:>4}  {:<24} {:<16} {} annotations",
            annotator.id,
            name,
            annotator.login.as_deref().unwrap_or_default(),
            annotator.annotations.len()
        );
    }

    Ok(())
}
