mod common;

use anyhow::Result;
use bankbook::application::AppError;
use common::{demo_service, rows};

#[test]
fn test_demo_sequence() -> Result<()> {
    let mut service = demo_service()?;
    assert_eq!(
        rows(&service),
        vec!["1001 | John Doe | 1000.00", "1002 | Jane Roe | 500.00"]
    );

    let deposit = service.deposit("1001", 50000)?;
    assert_eq!(deposit.balance, 150000);

    let withdrawal = service.withdraw("1002", 20000)?;
    assert_eq!(withdrawal.balance, 30000);

    let transfer = service.transfer("1001", "1002", 10000)?;
    assert_eq!(transfer.from_balance, 140000);
    assert_eq!(transfer.to_balance, 40000);
    assert_eq!(
        rows(&service),
        vec!["1001 | John Doe | 1400.00", "1002 | Jane Roe | 400.00"]
    );

    service.close_account("1001")?;
    service.update_holder("1002", "Jane Doe")?;
    assert_eq!(rows(&service), vec!["1002 | Jane Doe | 400.00"]);

    Ok(())
}

#[test]
fn test_withdraw_succeeds_iff_amount_within_balance() -> Result<()> {
    let mut service = demo_service()?;

    for (amount, ok) in [(50001, false), (50000, true), (1, false)] {
        let before = service.get_account("1002")?.balance();
        let result = service.withdraw("1002", amount);
        let after = service.get_account("1002")?.balance();

        assert_eq!(result.is_ok(), ok, "withdrawing {}", amount);
        if ok {
            assert_eq!(after, before - amount);
        } else {
            assert!(matches!(result, Err(AppError::InsufficientFunds { .. })));
            assert_eq!(after, before);
        }
    }
    Ok(())
}

#[test]
fn test_transfer_preserves_pair_total() -> Result<()> {
    let mut service = demo_service()?;
    let total = |s: &bankbook::LedgerService| -> i64 {
        s.list_accounts().iter().map(|a| a.balance()).sum()
    };
    let before = total(&service);

    for amount in [25000, 24000, 100000, 200000] {
        let _ = service.transfer("1002", "1001", amount);
        assert_eq!(total(&service), before);
    }

    // Only the first two fit: 500.00 -> 250.00 -> 10.00 left, the rest are refused
    assert_eq!(service.get_account("1002")?.balance(), 1000);
    assert_eq!(service.get_account("1001")?.balance(), 149000);
    Ok(())
}

#[test]
fn test_close_removes_exactly_one_account() -> Result<()> {
    let mut service = demo_service()?;
    service.open_account("1003", "Max Mustermann", 0)?;

    let closed = service.close_account("1002")?;
    assert_eq!(closed.holder_name(), "Jane Roe");

    let ids: Vec<&str> = service.list_accounts().iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["1001", "1003"]);

    assert_eq!(
        service.close_account("1002").unwrap_err(),
        AppError::AccountNotFound("1002".into())
    );
    assert_eq!(service.list_accounts().len(), 2);
    Ok(())
}

#[test]
fn test_unknown_ids_change_nothing() -> Result<()> {
    let mut service = demo_service()?;
    let snapshot = rows(&service);

    assert!(matches!(
        service.deposit("0000", 100),
        Err(AppError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.update_holder("0000", "Nobody"),
        Err(AppError::AccountNotFound(_))
    ));
    assert!(matches!(
        service.transfer("1001", "0000", 100),
        Err(AppError::AccountNotFound(id)) if id == "0000"
    ));

    assert_eq!(rows(&service), snapshot);
    Ok(())
}

#[test]
fn test_summary_tracks_operations() -> Result<()> {
    let mut service = demo_service()?;
    assert_eq!(service.summary().total_balance, 150000);

    service.deposit("1002", 1234)?;
    service.close_account("1001")?;

    let summary = service.summary();
    assert_eq!(summary.account_count, 1);
    assert_eq!(summary.total_balance, 51234);
    Ok(())
}
