//
//  pagerduty-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive prompts built on `dialoguer`.
//!
//! Used by `pd auth set` to collect a token without echoing it, and by
//! commands that change data to ask before doing so.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

use crate::auth::is_valid_token;

/// Asks for an API token with hidden input.
///
/// The prompt repeats until the input has a valid token shape.
pub fn prompt_token(message: &str) -> Result<String> {
    let token = Password::new()
        .with_prompt(message)
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_token(input.trim()) {
                Ok(())
            } else {
                Err("Expected a 20 character REST API key or a 64 character OAuth token")
            }
        })
        .interact()?;
    Ok(token.trim().to_string())
}

/// Asks for an optional line of text. Empty input is `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// Asks a yes/no question.
pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
