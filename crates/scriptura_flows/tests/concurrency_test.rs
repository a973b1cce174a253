//! Independent flows running at the same time must not see each other's data.

mod test_utils;

use scriptura_core::CharacterProfile;
use scriptura_flows::{FlowInvoker, catalogue};
use std::sync::Arc;
use test_utils::{MockDriver, test_config};

/// Quote the name found in the prompt back to the caller.
fn quote_own_name(prompt: &str) -> String {
    let name = prompt
        .lines()
        .find_map(|line| line.strip_prefix("Name: "))
        .unwrap_or("nobody");
    format!(r#"{{"quote": "I am {}."}}"#, name)
}

fn request_for(name: &str) -> catalogue::CharacterQuoteRequest {
    catalogue::CharacterQuoteRequest {
        character: CharacterProfile::new("A traveller").with_name(name),
        situation: None,
    }
}

#[tokio::test]
async fn test_joined_flows_keep_their_own_results() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_echo(quote_own_name));
    let invoker = FlowInvoker::new(driver.clone(), test_config());
    let flow = catalogue::character_quote();

    let maren = request_for("Maren");
    let ilse = request_for("Ilse");
    let (first, second) = tokio::join!(invoker.invoke(&flow, &maren), invoker.invoke(&flow, &ilse));

    assert_eq!(first?.quote, "I am Maren.");
    assert_eq!(second?.quote, "I am Ilse.");
    assert_eq!(driver.call_count(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_spawned_flows_share_one_invoker() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_echo(quote_own_name));
    let invoker = FlowInvoker::new(driver.clone(), test_config());

    let names = ["Ada", "Bran", "Cato", "Dilys", "Emrys", "Fen", "Gwen", "Hal"];
    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let invoker = invoker.clone();
            let request = request_for(name);
            tokio::spawn(async move {
                invoker
                    .invoke(&catalogue::character_quote(), &request)
                    .await
            })
        })
        .collect();

    for (name, handle) in names.iter().zip(handles) {
        let quote = handle.await??;
        assert_eq!(quote.quote, format!("I am {}.", name));
    }
    assert_eq!(driver.call_count(), names.len());
    Ok(())
}

#[tokio::test]
async fn test_one_failure_does_not_affect_the_other() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_echo(quote_own_name));
    let invoker = FlowInvoker::new(driver.clone(), test_config());
    let flow = catalogue::character_quote();

    let good = request_for("Maren");
    let bad = catalogue::CharacterQuoteRequest {
        character: CharacterProfile::new(""),
        situation: None,
    };
    let (ok, err) = tokio::join!(invoker.invoke(&flow, &good), invoker.invoke(&flow, &bad));

    assert_eq!(ok?.quote, "I am Maren.");
    assert!(err.is_err());
    assert_eq!(driver.call_count(), 1);
    Ok(())
}
