use super::*;
use assert_call::{call, CallRecorder};
use std::cell::Cell;

fn on_unsubscribe(rc: Rc<Cell<i32>>) {
    call!("{}", rc.get());
}

#[test]
fn from_fn_calls_on_drop() {
    let mut cr = CallRecorder::new();
    {
        let _s = Subscription::from_fn(|| call!("drop"));
        cr.verify(());
    }
    cr.verify("drop");
}

#[test]
fn from_weak_fn_calls_when_alive() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(7));
    {
        let _s = Subscription::from_weak_fn(Rc::downgrade(&rc), on_unsubscribe);
    }
    cr.verify("7");
}

#[test]
fn from_weak_fn_skips_when_dead() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(7));
    let s = Subscription::from_weak_fn(Rc::downgrade(&rc), on_unsubscribe);
    drop(rc);
    drop(s);
    cr.verify(());
}

#[test]
fn from_many_releases_all() {
    let mut cr = CallRecorder::new();
    let s = Subscription::from_many([
        Subscription::from_fn(|| call!("a")),
        Subscription::empty(),
        Subscription::from_fn(|| call!("b")),
    ]);
    cr.verify(());
    drop(s);
    cr.verify(["a", "b"]);
}

#[test]
fn detach_never_unsubscribes() {
    let mut cr = CallRecorder::new();
    Subscription::from_fn(|| call!("drop")).detach();
    Subscription::from_many([Subscription::from_fn(|| call!("inner"))]).detach();
    cr.verify(());
}
