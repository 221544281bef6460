//! Mock catalogue the store starts from when seeding is enabled.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{Comment, Idea, ValidationStatus};

pub const CATEGORIES: [&str; 4] = ["SaaS", "Consumer", "Hardware", "Marketplace"];

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn comment(
    id: &str,
    author: &str,
    role: Option<&str>,
    text: &str,
    created_at: DateTime<Utc>,
) -> Comment {
    Comment {
        id: id.to_string(),
        author: author.to_string(),
        text: text.to_string(),
        created_at,
        role: role.map(str::to_string),
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

pub fn mock_ideas() -> Vec<Idea> {
    vec![
        Idea {
            id: "1".to_string(),
            title: "ShelfLife".to_string(),
            tagline: "Expiry tracking for small grocery stores".to_string(),
            category: "SaaS".to_string(),
            tags: tags(&["retail", "food-waste", "b2b"]),
            description: "Independent grocers throw away 8-12% of perishable stock because expiry dates live on paper lists.".to_string(),
            solution: "Scan deliveries once, get a morning list of what to discount and what to pull.".to_string(),
            business_model: "Monthly subscription per store".to_string(),
            target_audience: "Owner-operated grocery and convenience stores".to_string(),
            risks: "Store staff may not keep scanning after the first week.".to_string(),
            validation_goals: "Will 10 store owners pay $29/month after a two week trial?".to_string(),
            upvotes: 412,
            downvotes: 38,
            views: 5230,
            subscribers: 340,
            comments: vec![
                comment("c1", "Maya R.", Some("Founder"), "We lose a crate of yoghurt a week. I would try this.", at(2024, 3, 4, 9)),
                comment("c2", "Devon K.", Some("Investor"), "How do you handle items without barcodes?", at(2024, 3, 5, 14)),
            ],
            created_at: at(2024, 3, 1, 8),
            author_name: "Priya Natarajan".to_string(),
            status: ValidationStatus::Beta,
        },
        Idea {
            id: "2".to_string(),
            title: "QuietDesk".to_string(),
            tagline: "Book a silent desk in a cafe by the hour".to_string(),
            category: "Marketplace".to_string(),
            tags: tags(&["remote-work", "cafes"]),
            description: "Remote workers camp in cafes and buy one coffee; owners resent it and workers feel unwelcome.".to_string(),
            solution: "Cafes list quiet tables for hourly booking with a drink included.".to_string(),
            business_model: "15% commission per booking".to_string(),
            target_audience: "Freelancers and hybrid employees in dense cities".to_string(),
            risks: "Cafes may prefer turnover over bookings at peak hours.".to_string(),
            validation_goals: "Do cafes agree to reserve at least two tables on weekdays?".to_string(),
            upvotes: 96,
            downvotes: 21,
            views: 1410,
            subscribers: 48,
            comments: vec![comment("c3", "Sam O.", Some("Maker"), "Power outlets are the real bottleneck.", at(2024, 4, 12, 10))],
            created_at: at(2024, 4, 10, 16),
            author_name: "Jonas Weber".to_string(),
            status: ValidationStatus::Prototype,
        },
        Idea {
            id: "3".to_string(),
            title: "SoilSense Mini".to_string(),
            tagline: "A $15 soil moisture probe that texts you".to_string(),
            category: "Hardware".to_string(),
            tags: tags(&["iot", "gardening", "agritech"]),
            description: "Home gardeners overwater or underwater because they cannot tell what is happening below the surface.".to_string(),
            solution: "Battery probe with a LoRa bridge that sends a plain text message when a pot needs water.".to_string(),
            business_model: "Hardware margin plus optional plant-care subscription".to_string(),
            target_audience: "Balcony and allotment gardeners".to_string(),
            risks: "Unit cost may not reach $15 below 10k units.".to_string(),
            validation_goals: "Can we collect 500 pre-orders at $19?".to_string(),
            upvotes: 28,
            downvotes: 4,
            views: 600,
            subscribers: 17,
            comments: vec![],
            created_at: at(2024, 5, 2, 11),
            author_name: "Ana Lucia Torres".to_string(),
            status: ValidationStatus::Alpha,
        },
        Idea {
            id: "4".to_string(),
            title: "Swapsy".to_string(),
            tagline: "Trade kids' clothes with parents nearby".to_string(),
            category: "Consumer".to_string(),
            tags: tags(&["parents", "circular-economy", "local"]),
            description: "Children outgrow clothes in months; reselling is slow and donating feels wasteful.".to_string(),
            solution: "Bundle-for-bundle swaps matched by size and distance, handed over at school gates.".to_string(),
            business_model: "Freemium with paid priority matching".to_string(),
            target_audience: "Parents of children under 8".to_string(),
            risks: "Needs local density before any swap works.".to_string(),
            validation_goals: "Will 50 parents in one district list a bundle within a week?".to_string(),
            upvotes: 12,
            downvotes: 9,
            views: 230,
            subscribers: 6,
            comments: vec![
                comment("c4", "Lena P.", None, "Sizes vary wildly between brands.", at(2024, 5, 20, 19)),
                comment("c5", "Marco D.", Some("Maker"), "School gate handover is clever.", at(2024, 5, 21, 7)),
                comment("c6", "Aisha B.", Some("Investor"), "What keeps people from leaving after one swap?", at(2024, 5, 22, 13)),
            ],
            created_at: at(2024, 5, 18, 20),
            author_name: "Chloe Martin".to_string(),
            status: ValidationStatus::Concept,
        },
        Idea {
            id: "5".to_string(),
            title: "InvoiceNudge".to_string(),
            tagline: "Polite, automatic payment reminders for freelancers".to_string(),
            category: "SaaS".to_string(),
            tags: tags(&["fintech", "freelance", "b2b"]),
            description: "Freelancers wait an average of 30 days past due and hate chasing clients.".to_string(),
            solution: "Connect your invoicing tool and let escalating, friendly reminders go out on a schedule.".to_string(),
            business_model: "$9/month flat".to_string(),
            target_audience: "Solo designers, developers and writers".to_string(),
            risks: "Invoicing tools may ship the same feature.".to_string(),
            validation_goals: "Does average days-to-paid drop by a week for pilot users?".to_string(),
            upvotes: 1180,
            downvotes: 95,
            views: 18400,
            subscribers: 905,
            comments: vec![comment("c7", "Tom H.", Some("Founder"), "I would pay for this today.", at(2024, 2, 15, 9))],
            created_at: at(2024, 2, 12, 10),
            author_name: "Rafael Souza".to_string(),
            status: ValidationStatus::Beta,
        },
    ]
}
