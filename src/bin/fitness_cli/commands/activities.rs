// ABOUTME: Activity and recommendation commands for fitness-cli
// ABOUTME: Thin wrappers over the activity API client with terminal output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppContext;
use crate::helpers::display::{display_activity, display_activity_list, display_recommendation};
use anyhow::{bail, Result};
use fitness_client::models::{ActivityRequest, ActivityType};

pub async fn list(context: &AppContext) -> Result<()> {
    let activities = context.api()?.get_activities().await?;
    display_activity_list(&activities);
    Ok(())
}

pub async fn show(context: &AppContext, activity_id: &str) -> Result<()> {
    let activity = context.api()?.get_activity(activity_id).await?;
    display_activity(&activity);
    Ok(())
}

pub async fn add(
    context: &AppContext,
    activity_type: &str,
    duration: u32,
    weight: Option<f64>,
    height: Option<f64>,
    gender: Option<String>,
) -> Result<()> {
    if duration == 0 {
        bail!("Duration must be at least one minute");
    }
    let activity_type: ActivityType = activity_type.parse()?;
    let mut request = ActivityRequest::new(activity_type, duration);
    request.weight = weight;
    request.height = height;
    request.gender = gender;

    let activity = context.api()?.add_activity(&request).await?;
    println!("Activity logged.");
    display_activity(&activity);
    Ok(())
}

pub async fn recommendation(context: &AppContext, activity_id: &str) -> Result<()> {
    let recommendation = context.api()?.get_activity_detail(activity_id).await?;
    display_recommendation(&recommendation);
    Ok(())
}

pub async fn delete(context: &AppContext, activity_id: &str) -> Result<()> {
    context
        .api()?
        .delete_activity_with_recommendation(activity_id)
        .await?;
    println!("Deleted activity {activity_id} and its recommendation.");
    Ok(())
}
