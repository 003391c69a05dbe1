//! Builds a handful of statements against a small bookstore schema.
//!
//! Run with: cargo run --example books -p sqlscribe
//!
//! Optionally point SQLSCRIBE_CONFIG at a TOML file:
//! vendor = "sqlserver"
//! naming_convention = "pascal_case"

use sqlscribe::{
    AggregateFunction, BuiltQuery, Clause, Entity, HavingCondition, Operator, Parenthesis,
    QueryBuilderFactory, ScribeConfig, ScribeResult, columns,
};
use std::env;

#[derive(Debug, Entity)]
#[allow(dead_code)]
struct Book {
    id: i32,
    title: String,
    price: f64,
    author_id: Option<i32>,
    published: chrono::NaiveDate,
}

#[derive(Debug, Entity)]
#[allow(dead_code)]
struct Author {
    id: i32,
    name: String,
}

#[derive(Debug, Entity)]
#[allow(dead_code)]
struct BookListing {
    title: String,
    price: f64,
}

fn print(label: &str, query: &BuiltQuery) {
    println!("-- {label}");
    println!("{}", query.sql());
    println!("{}\n", query.params_json());
}

fn main() -> ScribeResult<()> {
    let config = match env::var("SQLSCRIBE_CONFIG") {
        Ok(path) => ScribeConfig::load(path)?,
        Err(_) => ScribeConfig::default(),
    };
    let factory = QueryBuilderFactory::from_config(&config);
    println!("vendor={} naming={}\n", config.vendor, config.naming_convention);

    let by_id = factory
        .builder::<Book>()
        .select_all()
        .where_(Book::ID, Operator::Equal, 1)?
        .build()?;
    print("book by id", &by_id);

    let listing = factory
        .builder::<Book>()
        .map_select(Book::TITLE, BookListing::TITLE)?
        .map_select(Book::PRICE, BookListing::PRICE)?
        .where_between(
            Book::PUBLISHED,
            chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        )?
        .order_by_asc(Book::TITLE)?
        .set_page(2)
        .set_limit(25)
        .build()?;
    print("second page of listings", &listing);

    let by_author = factory
        .builder::<Book>()
        .select(Book::TITLE)?
        .select_as(Author::NAME, "author")?
        .left_join(Book::AUTHOR_ID, Author::ID)?
        .add_parenthesis(Parenthesis::Open, Clause::Where)?
        .where_(Author::NAME, Operator::Like, "Le Guin%")?
        .or(Clause::Where)?
        .where_(Book::AUTHOR_ID, Operator::Equal, None::<i32>)?
        .add_parenthesis(Parenthesis::Close, Clause::Where)?
        .where_(Book::PRICE, Operator::LessThanOrEqual, 20.0)?
        .build()?;
    print("books by author", &by_author);

    let report = factory
        .builder::<Book>()
        .select_group(columns![Book::AUTHOR_ID])?
        .count(Book::ID, Some("books"))?
        .sum_coalesce(Book::PRICE, 0.0, Some("total"))?
        .group_by(Book::AUTHOR_ID)?
        .and_having(
            [HavingCondition::new(
                AggregateFunction::Count,
                Book::ID,
                Operator::GreaterThan,
                2,
            )],
            false,
        )?
        .build()?;
    print("prolific authors", &report);

    let purge = factory
        .builder::<Book>()
        .delete()
        .where_in(Book::ID, [7, 8, 9])?
        .build()?;
    print("purge", &purge);

    let stats = factory.cache().stats();
    println!(
        "cache: {} selectors, {} names, {} resolutions",
        stats.member_entries, stats.name_entries, stats.resolutions
    );
    Ok(())
}
