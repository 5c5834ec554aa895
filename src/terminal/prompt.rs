use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use std::str::FromStr;

pub fn prompt(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

/// Like [prompt], but an empty answer is allowed.
pub fn prompt_optional(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Asks until the answer parses, empty answers give `None`.
pub fn prompt_parsed<T>(prompt: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            input
                .trim()
                .parse::<T>()
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .interact_text()?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    // validated above
    Ok(answer.parse().ok())
}

pub fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn prompt_select(prompt: &str, options: &[&str], default: usize) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()?)
}
