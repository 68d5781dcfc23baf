pub mod gitlab_client;
