mod composer_tests;
mod resolver_tests;
