use anyhow::{Context, Result};
use console::style;
use chrono::Local;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use tracing::{error, info};

use crate::{
    cli::args::*,
    models::{
        menu::{Menu, ALL_CATEGORIES},
        reservation::{ReservationRequest, DATE_FORMAT},
    },
    services::{load_menu, submit_reservation, OrderService, OrderUpdate},
    utils::{
        formatting::{
            format_menu_table, format_notification, format_order_summary, format_receipt, CART,
            CROSS, INFO,
        },
        Config,
    },
};

const ADD_ITEM: &str = "Add item";
const REMOVE_ITEM: &str = "Remove item";
const VIEW_ORDER: &str = "View order";
const CHECKOUT: &str = "Checkout";
const QUIT: &str = "Quit";

pub struct CliApp {
    config: Config,
    menu: Menu,
    json: bool,
}

impl CliApp {
    pub fn new(config: Config, args: &Args) -> Result<Self> {
        let menu_file = args.menu.as_ref().map(PathBuf::from).or_else(|| config.menu_file.clone());

        let menu = load_menu(menu_file.as_deref(), &config.pricing())
            .context("Failed to load menu")?;

        Ok(Self {
            config,
            menu,
            json: args.json,
        })
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Menu { category } => self.handle_menu(category),
            Commands::Quote { items, checkout } => self.handle_quote(items, checkout),
            Commands::Session => self.handle_session(),
            Commands::Reserve { name, date, time } => self.handle_reserve(name, date, time),
        }
    }

    fn new_order(&self) -> OrderService {
        OrderService::new(self.config.pricing())
    }

    fn handle_menu(&self, category: Option<String>) -> Result<()> {
        let items = self.menu.filter(category.as_deref());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        if items.is_empty() {
            println!(
                "{} No items in category '{}'. Categories: {}",
                INFO,
                style(category.unwrap_or_default()).yellow(),
                self.menu.categories().join(", ")
            );
        } else {
            println!("{} {}", INFO, style(format!("{} items on the menu", items.len())).bold());
            println!("{}", format_menu_table(&items));
        }

        Ok(())
    }

    fn handle_quote(&self, items: Vec<String>, checkout: bool) -> Result<()> {
        let mut order = self.new_order();

        for name in &items {
            match order.select_menu_item(&self.menu, name) {
                Ok(update) => {
                    if !self.json {
                        self.print_notification(&update);
                    }
                }
                Err(e) => {
                    println!("{} {}", CROSS, style(&e).red());
                    error!("Failed to add '{}': {}", name, e);
                }
            }
        }

        let update = if checkout {
            order.checkout_requested()
        } else {
            OrderUpdate {
                snapshot: order.snapshot(),
                notification: None,
                receipt: None,
            }
        };

        self.render(&update, &order)
    }

    fn handle_session(&self) -> Result<()> {
        let mut order = self.new_order();
        let theme = ColorfulTheme::default();
        let actions = [ADD_ITEM, REMOVE_ITEM, VIEW_ORDER, CHECKOUT, QUIT];

        info!("Ordering session started");
        println!("{} {}", CART, style("Welcome! Build your order below.").bold().cyan());

        loop {
            let prompt = format!("Your order ({} items)", order.cart().item_count());
            let choice = Select::with_theme(&theme)
                .with_prompt(prompt)
                .items(&actions[..])
                .default(0)
                .interact()?;

            match actions[choice] {
                ADD_ITEM => self.session_add_item(&mut order, &theme)?,
                REMOVE_ITEM => self.session_remove_item(&mut order, &theme)?,
                VIEW_ORDER => println!("{}", format_order_summary(&order.snapshot(), order.pricing())),
                CHECKOUT => {
                    let update = order.checkout_requested();
                    self.render(&update, &order)?;
                }
                _ => {
                    if order.cart().is_empty() || self.confirm_leave(&theme)? {
                        break;
                    }
                }
            }
        }

        info!("Ordering session ended");
        Ok(())
    }

    fn handle_reserve(&self, name: Option<String>, date: Option<String>, time: Option<String>) -> Result<()> {
        let theme = ColorfulTheme::default();
        let today = Local::now().date_naive();

        let name = match name {
            Some(name) => name,
            None => Input::<String>::with_theme(&theme).with_prompt("Name").interact_text()?,
        };
        let date = match date {
            Some(date) => date,
            None => Input::<String>::with_theme(&theme)
                .with_prompt("Date (YYYY-MM-DD)")
                .default(today.format(DATE_FORMAT).to_string())
                .interact_text()?,
        };
        let time = match time {
            Some(time) => time,
            None => Input::<String>::with_theme(&theme).with_prompt("Time (HH:MM)").interact_text()?,
        };

        match submit_reservation(ReservationRequest::new(&name, &date, &time), today) {
            Ok(update) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&update)?);
                } else {
                    println!("{}", format_notification(&update.notification));
                }
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("Reservation failed: {}", e);
            }
        }

        Ok(())
    }

    fn session_add_item(&self, order: &mut OrderService, theme: &ColorfulTheme) -> Result<()> {
        let mut categories = vec![ALL_CATEGORIES];
        categories.extend(self.menu.categories());

        let category = Select::with_theme(theme)
            .with_prompt("Category")
            .items(&categories[..])
            .default(0)
            .interact()?;

        let items = self.menu.filter(Some(categories[category]));
        let labels: Vec<String> = items
            .iter()
            .map(|item| format!("{} ({})", item.name, item.price))
            .collect();

        let picked = Select::with_theme(theme)
            .with_prompt("Item")
            .items(&labels[..])
            .default(0)
            .interact()?;

        let item = items[picked];
        match order.select_item(&item.name, &item.price) {
            Ok(update) => self.render(&update, order)?,
            Err(e) => {
                println!("{} Failed to add item: {}", CROSS, style(&e).red());
                error!("Failed to add '{}': {}", item.name, e);
            }
        }

        Ok(())
    }

    fn session_remove_item(&self, order: &mut OrderService, theme: &ColorfulTheme) -> Result<()> {
        let snapshot = order.snapshot();
        if snapshot.is_empty() {
            println!("{} Your order is empty", INFO);
            return Ok(());
        }

        let mut labels: Vec<String> = snapshot
            .lines
            .iter()
            .map(|line| {
                format!(
                    "{} × {} ({})",
                    line.name,
                    line.quantity,
                    order.pricing().format(line.line_total)
                )
            })
            .collect();
        labels.push("Cancel".to_string());

        let picked = Select::with_theme(theme)
            .with_prompt("Remove which item?")
            .items(&labels[..])
            .default(0)
            .interact()?;

        if let Some(line) = snapshot.lines.get(picked) {
            let update = order.remove_requested(&line.id);
            self.render(&update, order)?;
        }

        Ok(())
    }

    fn confirm_leave(&self, theme: &ColorfulTheme) -> Result<bool> {
        let leave = Confirm::with_theme(theme)
            .with_prompt("Your order has not been placed. Leave anyway?")
            .default(false)
            .interact()?;
        Ok(leave)
    }

    fn print_notification(&self, update: &OrderUpdate) {
        if let Some(notification) = &update.notification {
            println!("{}", format_notification(notification));
        }
    }

    fn render(&self, update: &OrderUpdate, order: &OrderService) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(update)?);
            return Ok(());
        }

        self.print_notification(update);

        match &update.receipt {
            Some(receipt) => println!("{}", format_receipt(receipt, order.pricing())),
            None => println!("{}", format_order_summary(&update.snapshot, order.pricing())),
        }

        Ok(())
    }
}
