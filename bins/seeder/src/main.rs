//! Database seeder for ERP development and testing.
//!
//! Seeds an administrator, two employees with birthdays around today, tax
//! rates, a customer and an announcement, then prints bearer tokens for
//! local testing.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use erp_db::entities::{
    erp_ac_tax, erp_hr_announcement_recipients, erp_hr_announcements, erp_hr_employees,
    erp_peoples, users,
};
use erp_shared::{AppConfig, JwtConfig, JwtService};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Administrator user ID.
const ADMIN_USER_ID: i64 = 1;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = erp_db::connect(&config.database)
        .await
        .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_users(&db).await;

    println!("Seeding employees...");
    seed_employees(&db).await;

    println!("Seeding tax rates...");
    seed_taxes(&db).await;

    println!("Seeding customers...");
    seed_customers(&db).await;

    println!("Seeding announcements...");
    seed_announcements(&db).await;

    println!("Seeding complete!");

    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: 24 * 60,
    });
    match jwt.generate_access_token(ADMIN_USER_ID, &["manage_options", "read"]) {
        Ok(token) => println!("Admin token: {token}"),
        Err(e) => eprintln!("Failed to issue admin token: {e}"),
    }
    match jwt.generate_access_token(2, &["read"]) {
        Ok(token) => println!("Employee token: {token}"),
        Err(e) => eprintln!("Failed to issue employee token: {e}"),
    }
}

/// The same month and day in 1990, Feb 29 falling back to Feb 28.
fn born_on(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, day.month(), day.day())
        .or_else(|| NaiveDate::from_ymd_opt(1990, day.month(), 28))
        .unwrap_or(NaiveDate::MIN)
}

async fn seed_users(db: &DatabaseConnection) {
    let people = [
        (ADMIN_USER_ID, "admin", "Site Admin", "", ""),
        (2, "grace", "Grace Hopper", "Grace", "Hopper"),
        (3, "alan", "Alan Turing", "Alan", "Turing"),
    ];

    for (id, login, display, first, last) in people {
        if users::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {login} already exists, skipping...");
            continue;
        }

        let user = users::ActiveModel {
            id: Set(id),
            user_login: Set(login.to_string()),
            display_name: Set(display.to_string()),
            first_name: Set(first.to_string()),
            last_name: Set(last.to_string()),
            email: Set(format!("{login}@erp.local")),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = user.insert(db).await {
            eprintln!("Failed to insert user {login}: {e}");
        } else {
            println!("  Created user: {login}");
        }
    }
}

async fn seed_employees(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let employees = [
        (1, 2, "Grace", "Hopper", born_on(today)),
        (2, 3, "Alan", "Turing", born_on(today + Duration::days(3))),
    ];

    for (id, user_id, first, last, dob) in employees {
        let employee = erp_hr_employees::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            first_name: Set(first.to_string()),
            last_name: Set(last.to_string()),
            date_of_birth: Set(Some(dob)),
            avatar_url: Set(String::new()),
            status: Set("active".to_string()),
        };

        if let Err(e) = employee.insert(db).await {
            eprintln!("Failed to insert employee {first}: {e}");
        } else {
            println!("  Created employee: {first} {last} ({dob})");
        }
    }
}

async fn seed_taxes(db: &DatabaseConnection) {
    let taxes = [(1, "VAT", Decimal::new(10, 0)), (2, "GST", Decimal::new(5, 0))];

    for (id, name, rate) in taxes {
        let tax = erp_ac_tax::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            rate: Set(rate),
        };

        if let Err(e) = tax.insert(db).await {
            eprintln!("Failed to insert tax {name}: {e}");
        } else {
            println!("  Created tax: {name} {rate}");
        }
    }
}

async fn seed_customers(db: &DatabaseConnection) {
    let customer = erp_peoples::ActiveModel {
        id: Set(4),
        people_type: Set("customer".to_string()),
        first_name: Set("Ada".to_string()),
        last_name: Set("Lovelace".to_string()),
        company: Set("Analytical Engines Ltd".to_string()),
        email: Set("ada@engines.example".to_string()),
        phone: Set(String::new()),
        billing_address: Set("12 St James's Square, London".to_string()),
    };

    if let Err(e) = customer.insert(db).await {
        eprintln!("Failed to insert customer: {e}");
    } else {
        println!("  Created customer: Ada Lovelace (id 4)");
    }
}

async fn seed_announcements(db: &DatabaseConnection) {
    let announcement = erp_hr_announcements::ActiveModel {
        id: Set(1),
        title: Set("Welcome to the new ERP".to_string()),
        content: Set(
            "<p>The <strong>sales</strong> and HR dashboards are now live.</p>".to_string(),
        ),
        published_at: Set(Utc::now().into()),
    };

    if let Err(e) = announcement.insert(db).await {
        eprintln!("Failed to insert announcement: {e}");
        return;
    }

    for (id, user_id) in [(1, ADMIN_USER_ID), (2, 2)] {
        let recipient = erp_hr_announcement_recipients::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            post_id: Set(1),
            status: Set("unread".to_string()),
        };

        if let Err(e) = recipient.insert(db).await {
            eprintln!("Failed to insert announcement recipient: {e}");
        }
    }
    println!("  Created announcement for 2 users");
}
