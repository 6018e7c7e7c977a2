//! In-process stand-ins for websocket session actors: a recorder actor that
//! captures every outbound frame as JSON for assertions.

use std::sync::{Arc, Mutex};

use actix::prelude::{Actor, Addr, Context, Handler, Message};
use backend::ws::hub::Outbound;
use serde_json::Value;

pub struct Recorder {
    messages: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    /// Start a recorder actor, returning its address and the captured frames.
    pub fn spawn() -> (Addr<Recorder>, Arc<Mutex<Vec<Value>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let addr = Recorder {
            messages: messages.clone(),
        }
        .start();
        (addr, messages)
    }
}

impl Actor for Recorder {
    type Context = Context<Self>;
}

impl Handler<Outbound> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: Outbound, _ctx: &mut Context<Self>) -> Self::Result {
        let value = serde_json::to_value(&msg.0).expect("serialize outbound frame");
        self.messages.lock().expect("messages lock").push(value);
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Flush;

impl Handler<Flush> for Recorder {
    type Result = ();

    fn handle(&mut self, _msg: Flush, _ctx: &mut Context<Self>) -> Self::Result {}
}

/// Wait until every frame sent so far has been processed by the recorder.
pub async fn flush(addr: &Addr<Recorder>) {
    addr.send(Flush).await.expect("flush recorder");
}

/// The `type` tags of every captured frame, in arrival order.
pub fn types(messages: &Arc<Mutex<Vec<Value>>>) -> Vec<String> {
    messages
        .lock()
        .expect("messages lock")
        .iter()
        .map(|m| m["type"].as_str().unwrap_or("").to_string())
        .collect()
}

/// The most recent frame with the given `type` tag, if any.
pub fn last_of(messages: &Arc<Mutex<Vec<Value>>>, type_tag: &str) -> Option<Value> {
    messages
        .lock()
        .expect("messages lock")
        .iter()
        .rev()
        .find(|m| m["type"] == type_tag)
        .cloned()
}
