//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and services the way a host would.
//! - Walk through one create/lookup/reject cycle with deterministic output.

use log::info;
use std::error::Error;
use strada_core::{
    core_version, init_logging, CoreConfig, Employment, EmploymentStore, IntegrityError,
    IntegrityService, User, UserStore,
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    init_logging(config.log_level, &config.log_target())?;
    let db = config.open_storage()?;
    info!("event=cli_start module=cli status=ok storage={:?}", config.storage);

    let service = IntegrityService::new(UserStore::new(db.clone()), EmploymentStore::new(db));

    let jane = User::new("Jane", "Doe", "jane@example.com")
        .with_employment(Employment::new(0, "Acme", 1_577_836_800_000));
    let created = service.create_user(&jane)?;
    println!("created user id={} email={}", created.id, created.email);

    match service.create_user(&jane) {
        Err(IntegrityError::EmailTaken(email)) => println!("rejected duplicate email={email}"),
        other => println!("unexpected duplicate outcome: {other:?}"),
    }

    match service.create_employment(&Employment::new(999, "Globex", 1_577_836_800_000)) {
        Err(err @ IntegrityError::UnknownUser(_)) => println!("rejected employment: {err}"),
        other => println!("unexpected employment outcome: {other:?}"),
    }

    for employment in service.employments().list_for_user(created.id)? {
        println!(
            "employment id={} company={} current={}",
            employment.id,
            employment.company,
            employment.is_current()
        );
    }

    println!("strada_core version={}", core_version());
    Ok(())
}
