pub mod question_generator;
pub mod quiz_controller;
pub mod quiz_service;
pub mod results_service;
