//! Client Tests
//!
//! Tests for the five operations against an in-memory connection
//! double injected through the Connector trait.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bytes::Bytes;
use respkv::network::{Connection, Connector};
use respkv::protocol::{Arg, Reply};
use respkv::{Client, RespError, Result};

// =============================================================================
// In-memory Fake
// =============================================================================

type Store = Rc<RefCell<HashMap<Vec<u8>, Vec<u8>>>>;

/// Counters observing the connection lifecycle from outside
#[derive(Default)]
struct Lifecycle {
    connects: usize,
    closes: usize,
}

/// Connector backed by a shared in-memory map instead of a socket
struct FakeConnector {
    store: Store,
    lifecycle: Rc<RefCell<Lifecycle>>,
    /// What a PING should answer
    pong: &'static [u8],
}

impl FakeConnector {
    fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(HashMap::new())),
            lifecycle: Rc::new(RefCell::new(Lifecycle::default())),
            pong: b"PONG",
        }
    }
}

impl Connector for FakeConnector {
    fn connect(&self) -> Result<Box<dyn Connection>> {
        self.lifecycle.borrow_mut().connects += 1;
        Ok(Box::new(FakeConnection {
            store: Rc::clone(&self.store),
            lifecycle: Rc::clone(&self.lifecycle),
            pong: self.pong,
        }))
    }
}

struct FakeConnection {
    store: Store,
    lifecycle: Rc<RefCell<Lifecycle>>,
    pong: &'static [u8],
}

fn arg_bytes(arg: &Arg) -> Vec<u8> {
    match arg {
        Arg::Bytes(b) => b.to_vec(),
        Arg::Text(s) => s.as_bytes().to_vec(),
        Arg::Integer(n) => n.to_string().into_bytes(),
        Arg::Array(_) => panic!("fake store does not take nested arguments"),
    }
}

impl Connection for FakeConnection {
    fn call(&mut self, args: &[Arg]) -> Result<Reply> {
        let command = arg_bytes(&args[0]);
        match command.as_slice() {
            b"SET" => {
                self.store
                    .borrow_mut()
                    .insert(arg_bytes(&args[1]), arg_bytes(&args[2]));
                Ok(Reply::Text(Bytes::from_static(b"OK")))
            }
            b"GET" => match self.store.borrow().get(&arg_bytes(&args[1])) {
                Some(value) => Ok(Reply::Bytes(Bytes::from(value.clone()))),
                None => Ok(Reply::Nil),
            },
            b"DEL" => {
                let removed = self.store.borrow_mut().remove(&arg_bytes(&args[1]));
                Ok(Reply::Integer(removed.is_some() as i64))
            }
            b"EXPIRE" => Ok(Reply::Integer(1)),
            b"PING" => Ok(Reply::Text(Bytes::copy_from_slice(self.pong))),
            other => Err(RespError::ServerFault(format!(
                "unknown command '{}'",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.lifecycle.borrow_mut().closes += 1;
        Ok(())
    }
}

// =============================================================================
// Operation Tests
// =============================================================================

#[test]
fn test_set_then_get() {
    let client = Client::with_connector(Box::new(FakeConnector::new()));

    client.set("key", b"value").unwrap();
    let fetched = client.get("key").unwrap();
    assert_eq!(fetched.as_deref(), Some(b"value".as_slice()));
}

#[test]
fn test_get_absent_key() {
    let client = Client::with_connector(Box::new(FakeConnector::new()));
    assert_eq!(client.get("missing").unwrap(), None);
}

#[test]
fn test_del_removes_key() {
    let client = Client::with_connector(Box::new(FakeConnector::new()));

    client.set("key", b"value").unwrap();
    assert!(client.get("key").unwrap().is_some());

    client.del("key").unwrap();
    assert_eq!(client.get("key").unwrap(), None);
}

#[test]
fn test_expire_discards_reply() {
    let client = Client::with_connector(Box::new(FakeConnector::new()));
    client.set("key", b"value").unwrap();
    client.expire("key", 60).unwrap();
}

#[test]
fn test_ready_on_pong() {
    let client = Client::with_connector(Box::new(FakeConnector::new()));
    assert!(client.ready().unwrap());
}

#[test]
fn test_ready_false_on_other_reply() {
    let mut connector = FakeConnector::new();
    connector.pong = b"NOPE";
    let client = Client::with_connector(Box::new(connector));
    assert!(!client.ready().unwrap());
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_fresh_connection_per_operation() {
    let connector = FakeConnector::new();
    let lifecycle = Rc::clone(&connector.lifecycle);
    let client = Client::with_connector(Box::new(connector));

    client.set("a", b"1").unwrap();
    client.get("a").unwrap();
    client.ready().unwrap();

    let observed = lifecycle.borrow();
    assert_eq!(observed.connects, 3);
    assert_eq!(observed.closes, 3);
}

#[test]
fn test_release_runs_when_call_fails() {
    struct Failing {
        lifecycle: Rc<RefCell<Lifecycle>>,
    }
    impl Connection for Failing {
        fn call(&mut self, _args: &[Arg]) -> Result<Reply> {
            Err(RespError::ServerFault("NOAUTH".to_string()))
        }
        fn close(&mut self) -> Result<()> {
            self.lifecycle.borrow_mut().closes += 1;
            Ok(())
        }
    }
    struct FailingConnector {
        lifecycle: Rc<RefCell<Lifecycle>>,
    }
    impl Connector for FailingConnector {
        fn connect(&self) -> Result<Box<dyn Connection>> {
            self.lifecycle.borrow_mut().connects += 1;
            Ok(Box::new(Failing {
                lifecycle: Rc::clone(&self.lifecycle),
            }))
        }
    }

    let lifecycle = Rc::new(RefCell::new(Lifecycle::default()));
    let client = Client::with_connector(Box::new(FailingConnector {
        lifecycle: Rc::clone(&lifecycle),
    }));

    match client.get("key") {
        Err(RespError::ServerFault(message)) => assert_eq!(message, "NOAUTH"),
        other => panic!("Expected ServerFault, got {:?}", other),
    }

    // The connection was still released despite the failed call
    let observed = lifecycle.borrow();
    assert_eq!(observed.connects, 1);
    assert_eq!(observed.closes, 1);
}

#[test]
fn test_connect_failure_surfaces() {
    struct RefusingConnector;
    impl Connector for RefusingConnector {
        fn connect(&self) -> Result<Box<dyn Connection>> {
            Err(RespError::ServerFault("WRONGPASS".to_string()))
        }
    }

    let client = Client::with_connector(Box::new(RefusingConnector));
    match client.ready() {
        Err(RespError::ServerFault(message)) => assert_eq!(message, "WRONGPASS"),
        other => panic!("Expected ServerFault, got {:?}", other),
    }
}
