mod address;
mod booking;
mod business;
mod offering;
mod pet;
mod refresh_token;
mod user;
