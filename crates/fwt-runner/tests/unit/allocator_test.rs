//! Tests for port and container name allocation

use std::collections::HashSet;
use std::sync::Arc;

use fwt_runner::FixtureAllocator;

#[test]
fn test_slots_are_sequential() {
    let allocator = FixtureAllocator::new(3001, None);

    let first = allocator.allocate("test_a").unwrap();
    let second = allocator.allocate("test_b").unwrap();

    assert_eq!(first.app_port, 3001);
    assert_eq!(first.container_name, "test_a-0");
    assert_eq!(first.control_port, None);
    assert_eq!(second.app_port, 3002);
    assert_eq!(second.container_name, "test_b-1");
    assert_eq!(allocator.allocated(), 2);
}

#[test]
fn test_control_ports_follow_the_same_counter() {
    let allocator = FixtureAllocator::new(3001, Some(8100));

    allocator.allocate("control_test_a").unwrap();
    let slot = allocator.allocate("control_test_b").unwrap();

    assert_eq!(slot.app_port, 3002);
    assert_eq!(slot.control_port, Some(8101));
}

#[test]
fn test_port_overflow_is_an_error() {
    let allocator = FixtureAllocator::new(u16::MAX, None);

    assert!(allocator.allocate("test_a").is_ok());
    let err = allocator.allocate("test_b").unwrap_err();
    assert!(err.to_string().contains("Port range exhausted"));
}

#[test]
fn test_counter_exhaustion_is_an_error() {
    let allocator = FixtureAllocator::new(0, None);

    for _ in 0..u16::MAX {
        allocator.allocate("test_a").unwrap();
    }
    assert_eq!(allocator.allocated(), u16::MAX);

    let err = allocator.allocate("test_a").unwrap_err();
    assert!(err.to_string().contains("Fixture counter exhausted"));
    assert_eq!(allocator.allocated(), u16::MAX);
}

#[test]
fn test_concurrent_allocation_is_unique() {
    let allocator = Arc::new(FixtureAllocator::new(4000, None));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let allocator = Arc::clone(&allocator);
            std::thread::spawn(move || {
                (0..25)
                    .map(|j| allocator.allocate(&format!("test_{i}_{j}")).unwrap().app_port)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ports: HashSet<u16> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ports.len(), 200);
}
