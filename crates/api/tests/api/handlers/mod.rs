mod availability_test;
mod router_test;
