use crate::api::{ApiClient, NewUser, ProfileUpdate};
use crate::auth::AuthState;
use crate::error::ApiError;
use crate::logger::Logger;
use crate::validate;
use anyhow::Result;
use inquire::{Password, Text};

/// Interactive account flows. Each one takes the client it should talk
/// through—there is no module-level instance. Validation happens here, before
/// the network; server and transport failures are reported through the Logger
/// and never abort the process.

/// Prompts for the new account fields and registers it with the service.
pub async fn register(api: &ApiClient) -> Result<()> {
    let email = Text::new("Email:").prompt()?;
    let email = email.trim().to_string();
    let password = Password::new("Пароль:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let confirmation = Password::new("Повторіть пароль:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let name = Text::new("Ім'я:").prompt()?;
    let name = name.trim().to_string();
    let age_input = Text::new("Вік:").prompt()?;
    let description = Text::new("Про себе (необов'язково):").prompt()?;
    let description = description.trim().to_string();

    let age: u32 = match age_input.trim().parse() {
        Ok(age) => age,
        Err(_) => {
            Logger::error("Вік повинен бути від 13 до 120 років");
            return Ok(());
        }
    };

    // First failing check wins; nothing is sent until all of them pass.
    if let Err(e) = validate::email(&email)
        .and(validate::password(&password))
        .and(validate::passwords_match(&password, &confirmation))
        .and(validate::name(&name))
        .and(validate::age(age))
    {
        Logger::error(e.user_message());
        return Ok(());
    }

    Logger::info("Створюємо акаунт...");

    let user = NewUser {
        email: email.clone(),
        password,
        name,
        age,
        description: if description.is_empty() {
            None
        } else {
            Some(description)
        },
    };

    match api.register(&user).await {
        Ok(created) => {
            Logger::success(format!(
                "Аккаунт успішно створений для {}!",
                Logger::highlight(&created.email)
            ));
            Logger::info(format!(
                "Виконайте {}, щоб увійти.",
                Logger::dim("balachka login")
            ));
        }
        Err(e) => Logger::error(e.user_message()),
    }

    Ok(())
}

/// Prompts for credentials, logs in, and persists the session token.
pub async fn login(api: &mut ApiClient) -> Result<()> {
    let email = Text::new("Email:").prompt()?;
    let email = email.trim().to_string();
    let password = Password::new("Пароль:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    if let Err(e) = validate::email(&email).and(validate::password(&password)) {
        Logger::error(e.user_message());
        return Ok(());
    }

    Logger::info("Входимо...");

    match api.login(&email, &password).await {
        Ok(session) => {
            api.set_token(session.token.clone());

            let mut state = AuthState::load()?;
            state.token = Some(session.token);
            state.email = Some(email.clone());
            state.api_url = Some(api.base_url().to_string());
            state.save()?;

            Logger::success("Успішний вхід!");
            Logger::info(format!("Ви увійшли як {}", Logger::highlight(&email)));
        }
        Err(e) => Logger::error(e.login_message()),
    }

    Ok(())
}

/// Drops the token and wipes stored credentials. Never talks to the server.
pub fn logout(api: &mut ApiClient) -> Result<()> {
    api.logout();
    AuthState::clear()?;
    Logger::success("Ви вийшли з акаунта.");
    Ok(())
}

/// Shows the profile of whoever the held token belongs to.
pub async fn whoami(api: &mut ApiClient) -> Result<()> {
    if !api.has_token() {
        Logger::error("Ви не увійшли. Виконайте 'balachka login'.");
        return Ok(());
    }

    match api.current_user().await {
        Ok(user) => {
            Logger::success(format!("Ви увійшли як {}", Logger::highlight(&user.email)));
            if let Some(name) = &user.name {
                Logger::info(format!("Ім'я: {}", name));
            }
            if let Some(age) = user.age {
                Logger::info(format!("Вік: {}", age));
            }
            if let Some(description) = &user.description {
                Logger::info(format!("Про себе: {}", description));
            }
        }
        Err(ApiError::Api { status: 401, .. }) => drop_expired_session(api)?,
        Err(e) => Logger::error(e.user_message()),
    }

    Ok(())
}

/// Edits the profile in place: current values are prompt defaults, and only
/// the fields that actually changed go over the wire.
pub async fn update_profile(api: &mut ApiClient) -> Result<()> {
    if !api.has_token() {
        Logger::error("Ви не увійшли. Виконайте 'balachka login'.");
        return Ok(());
    }

    let current = match api.current_user().await {
        Ok(user) => user,
        Err(ApiError::Api { status: 401, .. }) => {
            drop_expired_session(api)?;
            return Ok(());
        }
        Err(e) => {
            Logger::error(e.user_message());
            return Ok(());
        }
    };

    let name = Text::new("Ім'я:")
        .with_initial_value(current.name.as_deref().unwrap_or(""))
        .prompt()?;
    let name = name.trim().to_string();
    let age_initial = current.age.map(|a| a.to_string()).unwrap_or_default();
    let age_input = Text::new("Вік:").with_initial_value(&age_initial).prompt()?;
    let description = Text::new("Про себе:")
        .with_initial_value(current.description.as_deref().unwrap_or(""))
        .prompt()?;
    let description = description.trim().to_string();

    let age: u32 = match age_input.trim().parse() {
        Ok(age) => age,
        Err(_) => {
            Logger::error("Вік повинен бути від 13 до 120 років");
            return Ok(());
        }
    };

    if let Err(e) = validate::name(&name).and(validate::age(age)) {
        Logger::error(e.user_message());
        return Ok(());
    }

    let update = ProfileUpdate {
        name: (current.name.as_deref() != Some(name.as_str())).then(|| name.clone()),
        age: (current.age != Some(age)).then_some(age),
        description: (!description.is_empty()
            && current.description.as_deref() != Some(description.as_str()))
        .then(|| description.clone()),
    };

    if update.name.is_none() && update.age.is_none() && update.description.is_none() {
        Logger::info("Нічого оновлювати.");
        return Ok(());
    }

    match api.update_profile(&update).await {
        Ok(_) => Logger::success("Профіль оновлено!"),
        // The token can expire between the prefill fetch and the update.
        Err(ApiError::Api { status: 401, .. }) => drop_expired_session(api)?,
        Err(e) => Logger::error(e.user_message()),
    }

    Ok(())
}

/// The server said 401: the token is gone or expired. Clear both the
/// in-memory copy and the persisted one, then point the user at login.
fn drop_expired_session(api: &mut ApiClient) -> Result<()> {
    api.logout();
    AuthState::clear()?;
    Logger::error("Сесія застаріла. Увійдіть знову через 'balachka login'.");
    Ok(())
}
