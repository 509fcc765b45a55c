//! GraphQL documents for the game backend
//!
//! Opaque request contracts; the selection sets cover exactly the fields the
//! rest of the bot reads back.

pub const LOGIN: &str = r#"mutation MutationTelegramUserLogin($webAppData: TelegramWebAppDataInput!) {
  telegramUserLogin(webAppData: $webAppData) {
    access_token
    __typename
  }
}"#;

pub const USER_ME: &str = r#"query QueryTelegramUserMe {
  telegramUserMe {
    firstName
    lastName
    username
    __typename
  }
}"#;

pub const GAME_CONFIG: &str = r#"query QUERY_GAME_CONFIG {
  telegramGameGetConfig {
    coinsAmount
    currentEnergy
    maxEnergy
    currentBoss {
      level
      currentHealth
      maxHealth
      __typename
    }
    freeBoosts {
      currentTurboAmount
      currentRefillEnergyAmount
      __typename
    }
    __typename
  }
}"#;

pub const PROCESS_TAPS_BATCH: &str = r#"mutation MutationGameProcessTapsBatch($payload: TelegramGameTapsBatchInput!) {
  telegramGameProcessTapsBatch(payload: $payload) {
    coinsAmount
    currentEnergy
    maxEnergy
    currentBoss {
      level
      currentHealth
      maxHealth
      __typename
    }
    __typename
  }
}"#;

pub const ACTIVATE_BOOSTER: &str = r#"mutation telegramGameActivateBooster($boosterType: BoosterType!) {
  telegramGameActivateBooster(boosterType: $boosterType) {
    currentEnergy
    currentBoss {
      level
      currentHealth
      maxHealth
      __typename
    }
    __typename
  }
}"#;

pub const SET_NEXT_BOSS: &str = r#"mutation telegramGameSetNextBoss {
  telegramGameSetNextBoss {
    currentBoss {
      level
      currentHealth
      maxHealth
      __typename
    }
    __typename
  }
}"#;
