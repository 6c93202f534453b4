use homework_bot::{
    app_init::initialize_app,
    config::{PRACTICUM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR, TELEGRAM_TOKEN_VAR},
    result::BotError,
};

// Installs the global subscriber, so this binary holds a single test.
#[test]
fn missing_tokens_stop_startup_before_polling() {
    for var in [PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR] {
        // SAFETY: only test in this binary, no other thread reads the environment
        unsafe { std::env::remove_var(var) };
    }
    let dir = tempfile::tempdir().unwrap();

    let result = initialize_app(dir.path().join("homework-bot.toml"), false);

    assert_eq!(
        result.err(),
        Some(BotError::MissingCredentials(vec!["PRACTICUM_TOKEN", "TOKEN", "CHAT_ID"]))
    );
    assert!(dir.path().join("homework-bot.toml").exists());
}
