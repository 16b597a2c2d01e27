// ABOUTME: Output formatting helpers for fitness-cli
// ABOUTME: Consistent display of auth state, redirects, activities and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_client::auth::{AuthState, Navigation};
use fitness_client::models::{Activity, Recommendation};

pub fn display_redirect(heading: &str, navigation: &Navigation) {
    println!("{heading}");
    println!("{}", "=".repeat(80));
    println!("{}", navigation.url());
    println!("{}", "=".repeat(80));
}

pub fn display_auth_state(state: &AuthState) {
    match &state.user {
        Some(user) => {
            println!("Signed in");
            println!("   User: {}", user.display_name().unwrap_or("unknown"));
            if let Some(email) = user.email() {
                println!("   Email: {email}");
            }
            if let Some(subject) = user.subject() {
                println!("   Subject: {subject}");
            }
        }
        None if state.token.is_some() => {
            println!("Access token stored, but the user could not be confirmed");
        }
        None => println!("Not signed in. Run: fitness-cli login"),
    }

    if let Some(error) = &state.error {
        println!("   Error: {error}");
    }
}

pub fn display_activity_list(activities: &[Activity]) {
    if activities.is_empty() {
        println!("No activities logged yet.");
        return;
    }

    println!(
        "{:<38} {:<12} {:>8} {:<20}",
        "ID", "TYPE", "MINUTES", "CREATED"
    );
    println!("{}", "-".repeat(80));
    for activity in activities {
        println!(
            "{:<38} {:<12} {:>8} {:<20}",
            activity.id,
            activity.activity_type.as_str(),
            activity
                .duration
                .map_or_else(|| "-".to_owned(), |minutes| minutes.to_string()),
            activity
                .created_at
                .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d %H:%M").to_string()),
        );
    }
}

pub fn display_activity(activity: &Activity) {
    println!("Activity {}", activity.id);
    println!("   Type: {}", activity.activity_type);
    if let Some(duration) = activity.duration {
        println!("   Duration: {duration} min");
    }
    if let Some(weight) = activity.weight {
        println!("   Weight: {weight} kg");
    }
    if let Some(height) = activity.height {
        println!("   Height: {height} cm");
    }
    if let Some(start) = activity.start_time {
        println!("   Started: {}", start.format("%Y-%m-%d %H:%M"));
    }
    for (metric, value) in &activity.additional_metrics {
        println!("   {metric}: {value}");
    }
}

fn display_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}");
    for item in items {
        println!("  • {item}");
    }
}

pub fn display_recommendation(recommendation: &Recommendation) {
    println!("Analysis for activity {}", recommendation.activity_id);
    println!("{}", "=".repeat(80));
    for section in recommendation.sections() {
        println!("{section}\n");
    }
    display_list("Calories burned", &recommendation.calories_burned);
    display_list("Improvements", &recommendation.improvement);
    display_list("Suggestions", &recommendation.suggestions);
    display_list("Safety guidelines", &recommendation.safety);
    display_list("Summary", &recommendation.summary);
}
