#![cfg(test)]

mod decode;
mod isa;
mod rtc;
mod save_restore;
mod timebase;
mod timeline;
