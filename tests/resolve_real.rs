use meshaudit::netutils::resolve_udp;
use std::env;

#[tokio::test]
async fn ip_literal_resolves_without_dns() {
    let eps = resolve_udp("127.0.0.1", 655).await.unwrap();
    assert_eq!(eps.len(), 1);
    assert!(!eps[0].is_ipv6());
    assert_eq!(eps[0].port, 655);
}

#[tokio::test]
async fn real_hostname_lookup_opt_in() {
    if env::var("REAL_NET_TEST").is_err() {
        eprintln!("Skipping real resolver test. Set REAL_NET_TEST=1 to enable.");
        return;
    }
    let eps = resolve_udp("localhost", 655).await.unwrap();
    assert!(!eps.is_empty());
    assert!(eps.iter().all(|e| e.port == 655));
}
