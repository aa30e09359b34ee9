mod common;
mod repository;
mod service;
